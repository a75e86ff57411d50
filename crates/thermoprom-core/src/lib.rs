//! thermoprom core: runtime-free building blocks of the exporter.
//!
//! Error taxonomy, reading extraction and the gauge registry with its
//! Prometheus text renderer. No async runtime or HTTP stack is pulled in here,
//! so the pieces can be tested and reused on their own.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible path
//! surfaces as `ExporterError`/`Result` so a misbehaving sensor never takes the
//! exporter down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod extract;
pub mod metrics;

/// Shared result type.
pub use error::{ErrorKind, ExporterError, Result};
