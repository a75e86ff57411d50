//! Shared application state for the HTTP layer.
//!
//! The registry is owned here and shared with the sampler as an `Arc`, so both
//! sides work on the same gauges without any globals.

use std::sync::Arc;

use thermoprom_core::metrics::Registry;

#[derive(Clone)]
pub struct AppState {
    registry: Arc<Registry>,
}

impl AppState {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn metrics(&self) -> &Registry {
        &self.registry
    }
}
