//! Axum router configuration for the webhook endpoint.

use axum::{routing::post, Router};

use super::handlers::{handle_stripe_webhook, method_not_allowed, WebhookAppState};

/// Path Stripe delivers events to.
pub const WEBHOOK_PATH: &str = "/api/webhooks";

/// Create the Stripe webhook router.
///
/// No user authentication: deliveries are authenticated by signature.
///
/// # Routes
/// - `POST /api/webhooks` - Handle Stripe webhooks
/// - any other method - 405 with `Allow: POST`
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new().route(
        WEBHOOK_PATH,
        post(handle_stripe_webhook).fallback(method_not_allowed),
    )
}
