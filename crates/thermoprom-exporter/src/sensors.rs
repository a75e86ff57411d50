//! The exporter's fixed metric set and sensor command.

use thermoprom_core::error::Result;
use thermoprom_core::metrics::Registry;

/// lm-sensors CLI.
pub const SENSORS_COMMAND: &str = "sensors";

pub const CPU_TEMPERATURE: &str = "cpu_temperature_celsius";
pub const CPU_TEMPERATURE_HELP: &str = "Current temperature of the CPU in degrees Celsius";

/// Registered but never sampled.
pub const POWER_USAGE: &str = "power_usage_watts";
pub const POWER_USAGE_HELP: &str = "Current power usage in watts";

/// Build the process-lifetime registry.
pub fn build_registry() -> Result<Registry> {
    Ok(Registry::builder()
        .gauge(CPU_TEMPERATURE, CPU_TEMPERATURE_HELP)?
        .gauge(POWER_USAGE, POWER_USAGE_HELP)?
        .build())
}
