//! Webhook error types.
//!
//! Verification failures are answered with 400 so Stripe surfaces them in the
//! dashboard. Dispatch failures are acknowledged with 200 so Stripe does not
//! redeliver the event.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised while authenticating and parsing a webhook delivery.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebhookError {
    /// The request carried no Stripe-Signature header.
    #[error("No stripe-signature header value was provided.")]
    MissingSignatureHeader,

    /// The header had no timestamp or no v1 signature.
    #[error("Unable to extract timestamp and signatures from header")]
    MalformedSignatureHeader,

    /// None of the v1 signatures matched the payload.
    #[error(
        "No signatures found matching the expected signature for payload. \
         Are you passing the raw request body you received from Stripe?"
    )]
    NoMatchingSignature,

    /// The signed timestamp is older than the configured tolerance.
    #[error("Timestamp outside the tolerance zone")]
    TimestampOutsideTolerance,

    /// Signature matched but the body is not a Stripe event.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// Failure reported by a subscription updater.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// The subscription service answered with a non-success status.
    #[error("Subscription service rejected update ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The subscription service could not be reached.
    #[error("Subscription service unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised after verification, while acting on the event.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A kind outside the dispatch table reached it.
    #[error("Unhandled event: {0}")]
    UnhandledEvent(String),

    /// The event object lacks a field the update needs.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The event object does not have the shape its kind implies.
    #[error("Malformed event object: {0}")]
    MalformedObject(String),

    #[error(transparent)]
    Update(#[from] UpdateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_errors_return_bad_request() {
        let errors = [
            WebhookError::MissingSignatureHeader,
            WebhookError::MalformedSignatureHeader,
            WebhookError::NoMatchingSignature,
            WebhookError::TimestampOutsideTolerance,
            WebhookError::InvalidPayload("expected value".to_string()),
        ];

        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn invalid_payload_displays_message() {
        let err = WebhookError::InvalidPayload("expected value at line 1 column 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid payload: expected value at line 1 column 1"
        );
    }

    #[test]
    fn no_matching_signature_mentions_raw_body() {
        let err = WebhookError::NoMatchingSignature;
        assert!(err.to_string().contains("raw request body"));
    }

    #[test]
    fn update_error_converts_into_dispatch_error() {
        let err: DispatchError = UpdateError::Unavailable("connection refused".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Subscription service unavailable: connection refused"
        );
    }

    #[test]
    fn missing_field_displays_field_name() {
        let err = DispatchError::MissingField("subscription");
        assert_eq!(err.to_string(), "Missing field: subscription");
    }
}
