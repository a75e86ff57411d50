//! Gauge store and Prometheus text rendering.
//!
//! Gauges hold an `f64` as raw bits in an `AtomicU64`, so one writer and any
//! number of readers never see a torn value. Registry membership is fixed once
//! [`RegistryBuilder::build`] returns.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{ExporterError, Result};

/// Escape a `# HELP` docstring.
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// Prometheus sample value formatting.
fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        // Display gives the shortest round-trip form: 61.0 -> "61", 53.2 -> "53.2".
        v.to_string()
    }
}

/// A single last-write-wins value.
#[derive(Debug)]
pub struct Gauge {
    name: String,
    help: String,
    bits: AtomicU64,
}

impl Gauge {
    fn new(name: String, help: String) -> Self {
        Self {
            name,
            help,
            bits: AtomicU64::new(0f64.to_bits()),
        }
    }

    pub fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", self.name, escape_help(&self.help));
        let _ = writeln!(out, "# TYPE {} gauge", self.name);
        let _ = writeln!(out, "{} {}", self.name, format_value(self.get()));
    }
}

/// Collects gauge definitions before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    gauges: Vec<Arc<Gauge>>,
}

impl RegistryBuilder {
    /// Register a gauge. Names must be valid Prometheus metric names and unique.
    pub fn gauge(mut self, name: &str, help: &str) -> Result<Self> {
        if !is_valid_metric_name(name) {
            return Err(ExporterError::InvalidMetricName(name.to_string()));
        }
        if self.gauges.iter().any(|g| g.name == name) {
            return Err(ExporterError::DuplicateGauge(name.to_string()));
        }
        self.gauges
            .push(Arc::new(Gauge::new(name.to_string(), help.to_string())));
        Ok(self)
    }

    pub fn build(self) -> Registry {
        tracing::debug!(gauges = self.gauges.len(), "metric registry built");
        Registry {
            gauges: self.gauges,
        }
    }
}

/// Fixed set of gauges shared by the sampler (writer) and `/metrics` (readers).
#[derive(Debug)]
pub struct Registry {
    gauges: Vec<Arc<Gauge>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Handle to a registered gauge.
    pub fn gauge(&self, name: &str) -> Option<Arc<Gauge>> {
        self.gauges.iter().find(|g| g.name == name).cloned()
    }

    /// Overwrite a gauge value. Unknown names change nothing.
    pub fn set(&self, name: &str, v: f64) -> Result<()> {
        let gauge = self
            .gauges
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| ExporterError::UnknownGauge(name.to_string()))?;
        gauge.set(v);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.gauges.iter().find(|g| g.name == name).map(|g| g.get())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.gauges.iter().map(|g| g.name.as_str())
    }

    /// Render all gauges in Prometheus text exposition format, in registration order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for g in &self.gauges {
            g.render(&mut out);
        }
        out
    }
}
