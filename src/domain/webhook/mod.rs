//! Webhook domain module.
//!
//! Stripe event envelope, the payload shapes we act on, and the errors raised
//! while verifying and dispatching deliveries.

mod errors;
mod payloads;
mod stripe_event;

pub use errors::{DispatchError, UpdateError, WebhookError};
pub use payloads::{CheckoutSessionPayload, ExpandableId, SubscriptionPayload};
pub use stripe_event::{StripeEvent, StripeEventData, StripeEventType, RELEVANT_EVENT_TYPES};

#[cfg(test)]
pub use stripe_event::StripeEventBuilder;
