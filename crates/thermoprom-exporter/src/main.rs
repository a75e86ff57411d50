//! thermoprom: Prometheus exporter for the CPU package temperature.
//!
//! - `GET /metrics` on `-listen-address` (default `:9010`)
//! - `sensors` sampled every `-scrape-interval` seconds (default 10)
//! - SIGINT/SIGTERM stop the sampler and drain HTTP connections

use std::process::ExitCode;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use thermoprom_exporter::{cli::Cli, config::ExporterConfig, server::Exporter, shutdown};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse_args(std::env::args()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let exporter = match ExporterConfig::from_cli(&cli).and_then(Exporter::new) {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "startup failed");
            return ExitCode::FAILURE;
        }
    };

    let token = CancellationToken::new();
    tokio::spawn(shutdown::wait_for_signal(token.clone()));

    match exporter.run(token).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "exporter failed");
            ExitCode::FAILURE
        }
    }
}
