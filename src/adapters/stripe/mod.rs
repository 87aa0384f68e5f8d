//! Stripe webhook adapter.
//!
//! Implements the `EventVerifier` port for Stripe deliveries.
//!
//! # Security
//!
//! - Webhook signatures use HMAC-SHA256 with constant-time comparison
//! - Timestamps are validated to prevent replay attacks (5-minute default window)
//! - The signing secret is passed as `secrecy::SecretString`

mod signature_header;
mod signature_verifier;

pub use signature_header::SignatureHeader;
pub use signature_verifier::{
    build_signature_header, compute_signature, StripeSignatureVerifier, DEFAULT_TOLERANCE_SECS,
};
