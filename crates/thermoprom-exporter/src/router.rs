//! Axum router wiring.
//!
//! Only the metrics path is routed; anything else falls through to axum's 404.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route(metrics_path, get(ops::metrics))
        .with_state(state)
}
