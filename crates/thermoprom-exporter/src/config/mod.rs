//! Exporter configuration (validated once at startup).

use std::time::Duration;

use thermoprom_core::error::{ExporterError, Result};

use crate::cli::Cli;
use crate::sensors::SENSORS_COMMAND;

const DEFAULT_METRICS_PATH: &str = "/metrics";
const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// `host:port` or `:port` (all interfaces).
    pub listen_address: String,
    pub scrape_interval: Duration,
    pub metrics_path: String,
    /// Shell command whose stdout carries the temperature line.
    pub command: String,
    pub command_timeout: Duration,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            listen_address: ":9010".into(),
            scrape_interval: Duration::from_secs(10),
            metrics_path: DEFAULT_METRICS_PATH.into(),
            command: SENSORS_COMMAND.into(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }
}

impl ExporterConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cfg = Self {
            listen_address: cli.listen_address.clone(),
            scrape_interval: Duration::from_secs(cli.scrape_interval),
            ..Self::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addresses()?;
        if self.scrape_interval < Duration::from_secs(1) {
            return Err(ExporterError::Config(
                "scrape-interval must be at least 1 second".into(),
            ));
        }
        if !self.metrics_path.starts_with('/') {
            return Err(ExporterError::Config(format!(
                "metrics path must start with '/': {:?}",
                self.metrics_path
            )));
        }
        if self.command.trim().is_empty() {
            return Err(ExporterError::Config("sensor command must not be empty".into()));
        }
        if self.command_timeout.is_zero() {
            return Err(ExporterError::Config("command timeout must be non-zero".into()));
        }
        Ok(())
    }

    /// Addresses to try, in order, when binding the listener.
    ///
    /// `:port` means every interface: `[::]:port` first (dual-stack on Linux),
    /// then `0.0.0.0:port` for hosts without IPv6.
    pub fn bind_addresses(&self) -> Result<Vec<String>> {
        let addr = self.listen_address.trim();
        let (host, port) = addr.rsplit_once(':').ok_or_else(|| {
            ExporterError::Config(format!("listen-address must be host:port, got {addr:?}"))
        })?;
        port.parse::<u16>().map_err(|e| {
            ExporterError::Config(format!("listen-address has invalid port {port:?}: {e}"))
        })?;
        if host.is_empty() {
            Ok(vec![format!("[::]:{port}"), format!("0.0.0.0:{port}")])
        } else {
            Ok(vec![addr.to_string()])
        }
    }
}
