//! Periodic sampling loop.
//!
//! Command -> extractor -> float parse -> gauge. Any failed stage is logged and
//! the loop simply waits for the next tick; the gauge keeps its last good value.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use thermoprom_core::error::Result;
use thermoprom_core::extract::{parse_reading, Extractor};
use thermoprom_core::metrics::Registry;

use crate::command::CommandRunner;

pub struct Sampler {
    runner: Arc<dyn CommandRunner>,
    extractor: Arc<dyn Extractor>,
    registry: Arc<Registry>,
    command: String,
    gauge: String,
    interval: Duration,
}

impl Sampler {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        extractor: Arc<dyn Extractor>,
        registry: Arc<Registry>,
        command: impl Into<String>,
        gauge: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            runner,
            extractor,
            registry,
            command: command.into(),
            gauge: gauge.into(),
            interval,
        }
    }

    /// One sampling cycle. The gauge is written only when every stage succeeds.
    pub async fn sample_once(&self) -> Result<f64> {
        let output = self.runner.run(&self.command).await?;
        let raw = self.extractor.extract(&output)?;
        let value = parse_reading(&raw)?;
        self.registry.set(&self.gauge, value)?;
        Ok(value)
    }

    /// Sample every `interval` until `shutdown` fires. The first cycle runs immediately.
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(
            command = %self.command,
            gauge = %self.gauge,
            interval_secs = self.interval.as_secs(),
            "sampler started"
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                res = self.sample_once() => match res {
                    Ok(value) => tracing::debug!(gauge = %self.gauge, value, "sample recorded"),
                    Err(e) if e.is_transient() => {
                        tracing::warn!(kind = e.kind().as_str(), error = %e, "sampling cycle failed")
                    }
                    Err(e) => {
                        tracing::error!(kind = e.kind().as_str(), error = %e, "sampling cycle failed")
                    }
                },
            }

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        tracing::info!("sampler stopped");
    }
}
