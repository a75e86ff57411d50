#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use thermoprom_core::metrics::Registry;
use thermoprom_core::{ErrorKind, ExporterError};

fn two_gauges() -> Registry {
    Registry::builder()
        .gauge("cpu_temperature_celsius", "Current temperature of the CPU in degrees Celsius")
        .unwrap()
        .gauge("power_usage_watts", "Current power usage in watts")
        .unwrap()
        .build()
}

#[test]
fn fresh_gauges_render_zero() {
    let reg = two_gauges();
    let expected = "\
# HELP cpu_temperature_celsius Current temperature of the CPU in degrees Celsius
# TYPE cpu_temperature_celsius gauge
cpu_temperature_celsius 0
# HELP power_usage_watts Current power usage in watts
# TYPE power_usage_watts gauge
power_usage_watts 0
";
    assert_eq!(reg.render(), expected);
}

#[test]
fn set_is_reflected_verbatim() {
    let reg = two_gauges();
    reg.set("cpu_temperature_celsius", 53.2).unwrap();
    assert!(reg.render().contains("\ncpu_temperature_celsius 53.2\n"));

    reg.set("cpu_temperature_celsius", 61.0).unwrap();
    assert!(reg.render().contains("\ncpu_temperature_celsius 61\n"));
    assert_eq!(reg.get("cpu_temperature_celsius"), Some(61.0));
}

#[test]
fn repeated_sets_are_stable() {
    let reg = two_gauges();
    reg.set("cpu_temperature_celsius", 45.0).unwrap();
    let first = reg.render();
    reg.set("cpu_temperature_celsius", 45.0).unwrap();
    assert_eq!(reg.render(), first);
    assert_eq!(reg.render(), first);
}

#[test]
fn unknown_gauge_changes_nothing() {
    let reg = two_gauges();
    reg.set("cpu_temperature_celsius", 40.0).unwrap();
    let before = reg.render();

    let err = reg.set("gpu_temperature_celsius", 99.0).expect_err("unregistered");
    assert!(matches!(err, ExporterError::UnknownGauge(_)));
    assert_eq!(err.kind(), ErrorKind::Setup);
    assert_eq!(reg.render(), before);
}

#[test]
fn registration_rules() {
    let dup = Registry::builder()
        .gauge("a", "x")
        .unwrap()
        .gauge("a", "y")
        .expect_err("duplicate");
    assert!(matches!(dup, ExporterError::DuplicateGauge(_)));

    for bad in ["", "1abc", "cpu temp", "cpu-temp"] {
        let err = Registry::builder().gauge(bad, "h").expect_err(bad);
        assert!(matches!(err, ExporterError::InvalidMetricName(_)), "{bad}");
    }
}

#[test]
fn help_and_special_values_are_escaped() {
    let reg = Registry::builder()
        .gauge("weird", "line one\nback\\slash")
        .unwrap()
        .build();
    reg.set("weird", f64::NAN).unwrap();
    let body = reg.render();
    assert!(body.contains("# HELP weird line one\\nback\\\\slash\n"));
    assert!(body.contains("weird NaN\n"));

    reg.set("weird", f64::INFINITY).unwrap();
    assert!(reg.render().contains("weird +Inf\n"));
    reg.set("weird", f64::NEG_INFINITY).unwrap();
    assert!(reg.render().contains("weird -Inf\n"));
}

#[test]
fn names_keep_registration_order() {
    let reg = two_gauges();
    let names: Vec<_> = reg.names().collect();
    assert_eq!(names, ["cpu_temperature_celsius", "power_usage_watts"]);
    assert!(reg.gauge("power_usage_watts").is_some());
    assert!(reg.gauge("nope").is_none());
}

#[test]
fn concurrent_readers_never_see_torn_values() {
    let reg = Arc::new(two_gauges());
    let a = 12345.678_f64;
    let b = -0.000_123_f64;
    reg.set("cpu_temperature_celsius", a).unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let writer = {
        let reg = Arc::clone(&reg);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut flip = false;
            while !stop.load(Ordering::Relaxed) {
                let v = if flip { a } else { b };
                reg.set("cpu_temperature_celsius", v).unwrap();
                flip = !flip;
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let reg = Arc::clone(&reg);
            thread::spawn(move || {
                for _ in 0..2_000 {
                    let body = reg.render();
                    let line = body
                        .lines()
                        .find(|l| l.starts_with("cpu_temperature_celsius "))
                        .unwrap();
                    let v: f64 = line["cpu_temperature_celsius ".len()..].parse().unwrap();
                    assert!(v == a || v == b, "torn value {v}");
                }
            })
        })
        .collect();

    for r in readers {
        r.join().unwrap();
    }
    stop.store(true, Ordering::Relaxed);
    writer.join().unwrap();
}

#[test]
fn gauge_handle_writes_through_to_render() {
    let reg = two_gauges();
    let cpu = reg.gauge("cpu_temperature_celsius").unwrap();
    cpu.set(47.5);
    assert_eq!(cpu.get(), 47.5);
    assert_eq!(reg.get("cpu_temperature_celsius"), Some(47.5));
    assert!(reg.render().contains("\ncpu_temperature_celsius 47.5\n"));
}
