//! HandleStripeWebhookHandler - Command handler for Stripe webhook deliveries.

use std::sync::Arc;

use secrecy::SecretString;
use thiserror::Error;

use crate::domain::webhook::{
    CheckoutSessionPayload, DispatchError, StripeEvent, StripeEventType, SubscriptionPayload,
    WebhookError,
};
use crate::ports::{EventVerifier, SubscriptionUpdater};

/// Command to handle a Stripe webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleStripeWebhookCommand {
    /// Raw request body, byte for byte.
    pub payload: Vec<u8>,
    /// Stripe-Signature header, if present.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleStripeWebhookResult {
    /// A relevant event was forwarded to the subscription updater.
    SubscriptionUpdated {
        event_id: String,
        subscription_id: String,
        customer_id: String,
        activate: bool,
    },
    /// Verified, but not a kind we act on.
    Ignored { event_id: String, event_type: String },
}

/// Why a delivery was not fully processed.
#[derive(Debug, Error)]
pub enum HandleStripeWebhookError {
    /// The delivery could not be authenticated or parsed.
    #[error(transparent)]
    Verification(#[from] WebhookError),

    /// The event was authentic but acting on it failed.
    #[error("{source}")]
    Dispatch {
        event_id: String,
        event_type: String,
        #[source]
        source: DispatchError,
    },
}

/// Handler for Stripe webhook deliveries.
///
/// Verifies the delivery, then maps relevant event kinds onto a single
/// subscription update. Deliveries are not deduplicated; a redelivered event
/// produces a second update call.
pub struct HandleStripeWebhookHandler {
    verifier: Arc<dyn EventVerifier>,
    updater: Arc<dyn SubscriptionUpdater>,
    webhook_secret: Arc<SecretString>,
}

impl HandleStripeWebhookHandler {
    pub fn new(
        verifier: Arc<dyn EventVerifier>,
        updater: Arc<dyn SubscriptionUpdater>,
        webhook_secret: Arc<SecretString>,
    ) -> Self {
        Self {
            verifier,
            updater,
            webhook_secret,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleStripeWebhookCommand,
    ) -> Result<HandleStripeWebhookResult, HandleStripeWebhookError> {
        // 1. Verify signature and parse event
        let event = self
            .verifier
            .verify(&cmd.payload, cmd.signature.as_deref(), &self.webhook_secret)
            .await?;

        // 2. Acknowledge kinds we don't act on
        if !event.is_relevant() {
            tracing::debug!(
                event_id = %event.id,
                event_type = %event.event_type,
                livemode = event.is_live(),
                "Ignoring irrelevant webhook event"
            );
            return Ok(HandleStripeWebhookResult::Ignored {
                event_id: event.id,
                event_type: event.event_type,
            });
        }

        // 3. Dispatch
        match self.dispatch(&event).await {
            Ok(result) => Ok(result),
            Err(source) => {
                tracing::error!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    error = %source,
                    "Webhook handler failed"
                );
                Err(HandleStripeWebhookError::Dispatch {
                    event_id: event.id,
                    event_type: event.event_type,
                    source,
                })
            }
        }
    }

    async fn dispatch(
        &self,
        event: &StripeEvent,
    ) -> Result<HandleStripeWebhookResult, DispatchError> {
        let (subscription_id, customer_id, activate) = match event.parsed_type() {
            StripeEventType::CustomerSubscriptionUpdated
            | StripeEventType::CustomerSubscriptionDeleted => {
                let subscription: SubscriptionPayload = event
                    .deserialize_object()
                    .map_err(|e| DispatchError::MalformedObject(e.to_string()))?;
                (subscription.id, subscription.customer.into_id(), false)
            }
            StripeEventType::CheckoutSessionCompleted => {
                let session: CheckoutSessionPayload = event
                    .deserialize_object()
                    .map_err(|e| DispatchError::MalformedObject(e.to_string()))?;
                let subscription_id = session
                    .subscription
                    .ok_or(DispatchError::MissingField("subscription"))?
                    .into_id();
                let customer_id = session
                    .customer
                    .ok_or(DispatchError::MissingField("customer"))?
                    .into_id();
                (subscription_id, customer_id, true)
            }
            StripeEventType::Unknown => {
                return Err(DispatchError::UnhandledEvent(event.event_type.clone()))
            }
        };

        self.updater
            .update(&subscription_id, &customer_id, activate)
            .await?;

        tracing::info!(
            event_id = %event.id,
            event_type = %event.event_type,
            subscription_id = %subscription_id,
            customer_id = %customer_id,
            activate,
            livemode = event.is_live(),
            "Subscription updated from webhook"
        );

        Ok(HandleStripeWebhookResult::SubscriptionUpdated {
            event_id: event.id.clone(),
            subscription_id,
            customer_id,
            activate,
        })
    }
}
