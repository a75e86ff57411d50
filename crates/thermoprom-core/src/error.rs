//! Shared error type across thermoprom crates.

use std::num::ParseFloatError;
use std::time::Duration;

use thiserror::Error;

/// Coarse error classes attached to log records (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Sensor command could not run, exited non-zero or timed out.
    Execution,
    /// Command output did not contain the expected reading.
    Extraction,
    /// Extracted text is not a number.
    Parse,
    /// HTTP listener could not be started.
    ServerStart,
    /// HTTP server failed after it started listening.
    Serve,
    /// Invalid configuration, pattern or metric registration.
    Setup,
}

impl ErrorKind {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Execution => "EXECUTION",
            ErrorKind::Extraction => "EXTRACTION",
            ErrorKind::Parse => "PARSE",
            ErrorKind::ServerStart => "SERVER_START",
            ErrorKind::Serve => "SERVE",
            ErrorKind::Setup => "SETUP",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("command execution failed: {0}")]
    Execution(String),
    #[error("command timed out after {0:?}")]
    Timeout(Duration),
    #[error("no match found: {0}")]
    NotFound(String),
    #[error("invalid number {input:?}: {source}")]
    Parse {
        input: String,
        #[source]
        source: ParseFloatError,
    },
    #[error("invalid pattern: {0}")]
    Pattern(String),
    #[error("invalid metric name: {0}")]
    InvalidMetricName(String),
    #[error("gauge already registered: {0}")]
    DuplicateGauge(String),
    #[error("unknown gauge: {0}")]
    UnknownGauge(String),
    #[error("bad config: {0}")]
    Config(String),
    #[error("server start failed: {0}")]
    ServerStart(String),
    #[error("server stopped with error: {0}")]
    Serve(String),
}

impl ExporterError {
    /// Map the error to its coarse class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExporterError::Execution(_) | ExporterError::Timeout(_) => ErrorKind::Execution,
            ExporterError::NotFound(_) => ErrorKind::Extraction,
            ExporterError::Parse { .. } => ErrorKind::Parse,
            ExporterError::ServerStart(_) => ErrorKind::ServerStart,
            ExporterError::Serve(_) => ErrorKind::Serve,
            ExporterError::Pattern(_)
            | ExporterError::InvalidMetricName(_)
            | ExporterError::DuplicateGauge(_)
            | ExporterError::UnknownGauge(_)
            | ExporterError::Config(_) => ErrorKind::Setup,
        }
    }

    /// Whether the sampling loop should log and retry rather than give up.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Execution | ErrorKind::Extraction | ErrorKind::Parse
        )
    }
}
