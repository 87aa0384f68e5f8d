//! Parsing of the `Stripe-Signature` header.

use crate::domain::webhook::WebhookError;

/// Signature scheme Stripe currently signs with.
const EXPECTED_SCHEME: &str = "v1";

/// Parsed Stripe-Signature header components.
///
/// The header format is `t=<timestamp>,v1=<signature>[,v1=<signature>...][,v0=<legacy>]`.
/// Several `v1` entries appear while a signing secret is being rolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when Stripe signed the payload.
    pub timestamp: i64,

    /// Hex-encoded v1 signatures, in header order.
    pub v1_signatures: Vec<String>,
}

impl SignatureHeader {
    /// Parse a Stripe-Signature header into components.
    ///
    /// Unknown keys and items without `=` are ignored for forward
    /// compatibility.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MalformedSignatureHeader` if the timestamp is
    /// missing or not an integer, or if no v1 signature is present.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };

            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| WebhookError::MalformedSignatureHeader)?,
                    );
                }
                EXPECTED_SCHEME => v1_signatures.push(value.trim().to_string()),
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(WebhookError::MalformedSignatureHeader)?;
        if v1_signatures.is_empty() {
            return Err(WebhookError::MalformedSignatureHeader);
        }

        Ok(Self {
            timestamp,
            v1_signatures,
        })
    }
}
