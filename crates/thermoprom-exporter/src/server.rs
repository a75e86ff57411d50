//! Exporter lifecycle: bind, spawn the sampler, serve, drain.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use thermoprom_core::error::{ExporterError, Result};
use thermoprom_core::extract::{Extractor, RegexExtractor};
use thermoprom_core::metrics::Registry;

use crate::app_state::AppState;
use crate::command::{CommandRunner, ShellCommandRunner};
use crate::config::ExporterConfig;
use crate::router::build_router;
use crate::sampler::Sampler;
use crate::sensors::{build_registry, CPU_TEMPERATURE};

pub struct Exporter {
    cfg: ExporterConfig,
    registry: Arc<Registry>,
    runner: Arc<dyn CommandRunner>,
    extractor: Arc<dyn Extractor>,
}

impl Exporter {
    /// Production wiring: `bash -c sensors` + the package temperature regex.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        cfg.validate()?;
        let runner = Arc::new(ShellCommandRunner::new(cfg.command_timeout));
        Ok(Self {
            registry: Arc::new(build_registry()?),
            runner,
            extractor: Arc::new(RegexExtractor::temperature()?),
            cfg,
        })
    }

    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    /// Bind the first address that works; the error names the last one tried.
    pub async fn bind(&self) -> Result<TcpListener> {
        let mut last = ExporterError::ServerStart("no listen address".into());
        for addr in self.cfg.bind_addresses()? {
            match TcpListener::bind(&addr).await {
                Ok(listener) => return Ok(listener),
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "bind failed");
                    last = ExporterError::ServerStart(format!("bind {addr}: {e}"));
                }
            }
        }
        Err(last)
    }

    /// Serve until `shutdown` is cancelled, then drain connections and join the sampler.
    pub async fn serve(self, listener: TcpListener, shutdown: CancellationToken) -> Result<()> {
        let sampler = Sampler::new(
            Arc::clone(&self.runner),
            Arc::clone(&self.extractor),
            Arc::clone(&self.registry),
            self.cfg.command.clone(),
            CPU_TEMPERATURE,
            self.cfg.scrape_interval,
        );
        let sampler_task = tokio::spawn(sampler.run(shutdown.child_token()));

        let app = build_router(AppState::new(Arc::clone(&self.registry)), &self.cfg.metrics_path);
        let local = listener.local_addr().ok();
        tracing::info!(listen = ?local, path = %self.cfg.metrics_path, "thermoprom serving");

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown.clone().cancelled_owned())
            .await
            .map_err(|e| ExporterError::Serve(e.to_string()));

        // The server may also stop on its own; make sure the sampler follows.
        shutdown.cancel();
        if let Err(e) = sampler_task.await {
            tracing::error!(error = %e, "sampler task panicked");
        }
        tracing::info!("thermoprom stopped");
        served
    }

    pub async fn run(self, shutdown: CancellationToken) -> Result<()> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }
}
