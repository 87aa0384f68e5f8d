//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! ## Webhook Ports
//!
//! - `EventVerifier` - Signature verification and event parsing
//! - `SubscriptionUpdater` - Subscription state persistence

mod event_verifier;
mod subscription_updater;

pub use event_verifier::EventVerifier;
pub use subscription_updater::SubscriptionUpdater;
