//! HTTP DTOs for the webhook endpoint.

use serde::{Deserialize, Serialize};

/// Body sent when the delivery was verified but acting on it failed.
pub const HANDLER_FAILED_MESSAGE: &str = "Webhook handler failed.";

/// Acknowledgment returned for every accepted delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookReceivedResponse {
    pub received: bool,
}

impl WebhookReceivedResponse {
    pub fn received() -> Self {
        Self { received: true }
    }
}

/// Returned with status 200 when dispatch failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookFailedResponse {
    pub error: String,
}

impl WebhookFailedResponse {
    pub fn handler_failed() -> Self {
        Self {
            error: HANDLER_FAILED_MESSAGE.to_string(),
        }
    }
}
