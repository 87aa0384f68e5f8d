//! HTTP adapter for the Stripe webhook endpoint.
//!
//! - `POST /api/webhooks` - Verify and dispatch a Stripe delivery

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{WebhookFailedResponse, WebhookReceivedResponse, HANDLER_FAILED_MESSAGE};
pub use handlers::{WebhookAppState, STRIPE_SIGNATURE_HEADER};
pub use routes::{webhook_routes, WEBHOOK_PATH};
