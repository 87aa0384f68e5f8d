//! SubscriptionUpdater that forwards updates to a subscription service over HTTP.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::webhook::UpdateError;
use crate::ports::SubscriptionUpdater;

/// JSON body sent to the subscription service.
#[derive(Debug, Serialize)]
struct UpdateSubscriptionRequest<'a> {
    subscription_id: &'a str,
    customer_id: &'a str,
    activate: bool,
}

/// Forwards each update as `POST <endpoint>` with a JSON body.
pub struct HttpSubscriptionUpdater {
    endpoint: String,
    http_client: reqwest::Client,
}

impl HttpSubscriptionUpdater {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    pub fn with_client(endpoint: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client,
        }
    }
}

#[async_trait]
impl SubscriptionUpdater for HttpSubscriptionUpdater {
    async fn update(
        &self,
        subscription_id: &str,
        customer_id: &str,
        activate: bool,
    ) -> Result<(), UpdateError> {
        let body = UpdateSubscriptionRequest {
            subscription_id,
            customer_id,
            activate,
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    endpoint = %self.endpoint,
                    "Subscription service request failed"
                );
                UpdateError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                subscription_id,
                "Subscription service rejected update"
            );
            return Err(UpdateError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(subscription_id, customer_id, activate, "Subscription updated");
        Ok(())
    }
}
