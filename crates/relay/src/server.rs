//! HTTP surface: the webhook route and a liveness probe.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::{error, info};

use crate::handler::{AppState, handle_webhook};

/// Webhooks arrive as `POST /`; axum answers other methods on the route
/// with 405. `GET /healthz` serves liveness probes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handle_webhook))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "OK"
}

pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal, stopping"),
        Err(e) => error!("Failed to listen for shutdown signal: {e}"),
    }
}
