//! HTTP handlers for the webhook endpoint.
//!
//! These handlers connect Axum routes to the webhook command handler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use secrecy::SecretString;

use crate::application::handlers::webhook::{
    HandleStripeWebhookCommand, HandleStripeWebhookError, HandleStripeWebhookHandler,
};
use crate::ports::{EventVerifier, SubscriptionUpdater};

use super::dto::{WebhookFailedResponse, WebhookReceivedResponse};

/// Header Stripe puts the delivery signature in.
pub const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the webhook route.
///
/// Cloned for each request; every field is read-only and Arc-wrapped.
#[derive(Clone)]
pub struct WebhookAppState {
    pub event_verifier: Arc<dyn EventVerifier>,
    pub subscription_updater: Arc<dyn SubscriptionUpdater>,
    pub webhook_secret: Arc<SecretString>,
}

impl WebhookAppState {
    pub fn new(
        event_verifier: Arc<dyn EventVerifier>,
        subscription_updater: Arc<dyn SubscriptionUpdater>,
        webhook_secret: SecretString,
    ) -> Self {
        Self {
            event_verifier,
            subscription_updater,
            webhook_secret: Arc::new(webhook_secret),
        }
    }

    pub fn webhook_handler(&self) -> HandleStripeWebhookHandler {
        HandleStripeWebhookHandler::new(
            self.event_verifier.clone(),
            self.subscription_updater.clone(),
            self.webhook_secret.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/webhooks - Handle Stripe webhook events
///
/// Takes the body as raw `Bytes`: the signature covers the exact bytes sent,
/// so no JSON extractor may run first.
pub async fn handle_stripe_webhook(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookReceivedResponse>, WebhookApiError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let cmd = HandleStripeWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    state.webhook_handler().handle(cmd).await?;

    Ok(Json(WebhookReceivedResponse::received()))
}

/// Any method other than POST on the webhook route.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        "Method not allowed",
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook errors to HTTP responses.
///
/// Dispatch failures are answered with 200 so Stripe does not redeliver.
pub struct WebhookApiError(HandleStripeWebhookError);

impl From<HandleStripeWebhookError> for WebhookApiError {
    fn from(err: HandleStripeWebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        match self.0 {
            HandleStripeWebhookError::Verification(err) => {
                (err.status_code(), format!("Webhook error: {}", err)).into_response()
            }
            HandleStripeWebhookError::Dispatch { .. } => {
                (StatusCode::OK, Json(WebhookFailedResponse::handler_failed())).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::webhook::{DispatchError, WebhookError};

    #[test]
    fn verification_error_maps_to_bad_request() {
        let err = WebhookApiError(HandleStripeWebhookError::Verification(
            WebhookError::MissingSignatureHeader,
        ));

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn dispatch_error_maps_to_ok() {
        let err = WebhookApiError(HandleStripeWebhookError::Dispatch {
            event_id: "evt_1".to_string(),
            event_type: "checkout.session.completed".to_string(),
            source: DispatchError::MissingField("subscription"),
        });

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn method_not_allowed_sets_allow_header() {
        let response = method_not_allowed().await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST");
    }
}
