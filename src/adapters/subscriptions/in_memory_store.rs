//! In-memory implementation of SubscriptionUpdater.
//!
//! Keeps the latest state per subscription plus an ordered log of every
//! update call. Used when no subscription service is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::webhook::UpdateError;
use crate::ports::SubscriptionUpdater;

/// Stored state of one subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub customer_id: String,
    /// Activation flag from the most recent update.
    pub active: bool,
}

/// One call received by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCall {
    pub subscription_id: String,
    pub customer_id: String,
    pub activate: bool,
}

#[derive(Debug, Default)]
pub struct InMemorySubscriptionStore {
    records: RwLock<HashMap<String, SubscriptionRecord>>,
    calls: RwLock<Vec<UpdateCall>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, subscription_id: &str) -> Option<SubscriptionRecord> {
        self.records.read().await.get(subscription_id).cloned()
    }

    /// Every update received, oldest first.
    pub async fn calls(&self) -> Vec<UpdateCall> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl SubscriptionUpdater for InMemorySubscriptionStore {
    async fn update(
        &self,
        subscription_id: &str,
        customer_id: &str,
        activate: bool,
    ) -> Result<(), UpdateError> {
        self.calls.write().await.push(UpdateCall {
            subscription_id: subscription_id.to_string(),
            customer_id: customer_id.to_string(),
            activate,
        });

        // Upsert: the latest delivery wins.
        self.records.write().await.insert(
            subscription_id.to_string(),
            SubscriptionRecord {
                customer_id: customer_id.to_string(),
                active: activate,
            },
        );

        tracing::debug!(
            subscription_id,
            customer_id,
            activate,
            "Subscription stored in memory"
        );
        Ok(())
    }
}
