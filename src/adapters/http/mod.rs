//! HTTP adapters - REST API implementations.
//!
//! Each endpoint group has its own module; `app_router` assembles them.

pub mod health;
pub mod webhook;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

// Re-export key types for convenience
pub use webhook::{webhook_routes, WebhookAppState};

/// Build the complete application router with request tracing.
pub fn app_router(state: WebhookAppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .merge(webhook_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
