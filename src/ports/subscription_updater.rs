//! Subscription updater port.

use async_trait::async_trait;

use crate::domain::webhook::UpdateError;

/// Port for persisting subscription state.
///
/// Implementations must be idempotent: the webhook handler does not
/// deduplicate deliveries, so the same update can arrive more than once.
#[async_trait]
pub trait SubscriptionUpdater: Send + Sync {
    /// Upsert the subscription `subscription_id` owned by `customer_id`.
    ///
    /// `activate` is true when the subscription was just purchased through
    /// checkout and false when Stripe reports a change to an existing one.
    async fn update(
        &self,
        subscription_id: &str,
        customer_id: &str,
        activate: bool,
    ) -> Result<(), UpdateError>;
}
