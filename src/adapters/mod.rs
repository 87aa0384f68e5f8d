//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `http` - Axum routes for the webhook endpoint
//! - `stripe` - Stripe signature verification
//! - `subscriptions` - Subscription updaters (HTTP service, in-memory)

pub mod http;
pub mod stripe;
pub mod subscriptions;

pub use http::{app_router, WebhookAppState};
pub use stripe::StripeSignatureVerifier;
pub use subscriptions::{HttpSubscriptionUpdater, InMemorySubscriptionStore};
