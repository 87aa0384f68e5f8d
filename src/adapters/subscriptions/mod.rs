//! Subscription updater adapters.
//!
//! - `HttpSubscriptionUpdater` - forwards updates to the subscription service
//! - `InMemorySubscriptionStore` - process-local store for development and tests

mod http_updater;
mod in_memory_store;

pub use http_updater::HttpSubscriptionUpdater;
pub use in_memory_store::{InMemorySubscriptionStore, SubscriptionRecord, UpdateCall};
