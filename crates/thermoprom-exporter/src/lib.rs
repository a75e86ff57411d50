//! thermoprom exporter library entry.
//!
//! Wires the command runner, extractor and gauge registry into a sampling task
//! and serves the registry over HTTP. Consumed by the binary (`main.rs`) and
//! by integration tests.

pub mod app_state;
pub mod cli;
pub mod command;
pub mod config;
pub mod ops;
pub mod router;
pub mod sampler;
pub mod sensors;
pub mod server;
pub mod shutdown;
