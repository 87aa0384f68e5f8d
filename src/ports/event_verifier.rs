//! Event verifier port.
//!
//! Authenticates a webhook delivery and turns it into a typed event.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::webhook::{StripeEvent, WebhookError};

/// Port for webhook signature verification.
///
/// Implementations must compute the signature over `payload` exactly as
/// received; any re-encoding of the body breaks verification.
#[async_trait]
pub trait EventVerifier: Send + Sync {
    /// Verify `signature_header` against `payload` using `secret`, then parse
    /// the payload.
    ///
    /// `signature_header` is `None` when the request carried no signature.
    async fn verify(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
        secret: &SecretString,
    ) -> Result<StripeEvent, WebhookError>;
}
