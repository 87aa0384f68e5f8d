//! Shapes of `data.object` for the event kinds we act on.

use serde::Deserialize;

/// A Stripe reference that is either a bare id or an expanded object.
///
/// Stripe sends `"customer": "cus_123"` by default and
/// `"customer": {"id": "cus_123", ...}` when the field was expanded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExpandableId {
    Id(String),
    Object { id: String },
}

impl ExpandableId {
    pub fn into_id(self) -> String {
        match self {
            ExpandableId::Id(id) | ExpandableId::Object { id } => id,
        }
    }
}

/// `data.object` of `customer.subscription.*` events.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionPayload {
    /// Subscription id (sub_xxx).
    pub id: String,
    pub customer: ExpandableId,
}

/// `data.object` of `checkout.session.completed` events.
///
/// `subscription` is null for one-off payment sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionPayload {
    /// Checkout session id (cs_xxx).
    pub id: String,
    #[serde(default)]
    pub subscription: Option<ExpandableId>,
    #[serde(default)]
    pub customer: Option<ExpandableId>,
}
