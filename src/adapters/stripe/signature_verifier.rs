//! Stripe webhook signature verification.
//!
//! Implements the `EventVerifier` port the way Stripe's SDKs do:
//!
//! 1. Parse the `Stripe-Signature` header
//! 2. Compute HMAC-SHA256 over `<timestamp>.<raw body>` keyed by the secret
//! 3. Compare against every v1 signature in constant time
//! 4. Reject timestamps older than the tolerance (replay protection)
//! 5. Parse the JSON payload into a `StripeEvent`

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::webhook::{StripeEvent, WebhookError};
use crate::ports::EventVerifier;

use super::signature_header::SignatureHeader;

type HmacSha256 = Hmac<Sha256>;

/// Default maximum age for webhook signatures (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: u64 = 300;

/// Verifier for Stripe webhook signatures.
#[derive(Debug, Clone)]
pub struct StripeSignatureVerifier {
    /// Maximum signature age in seconds; 0 disables the check.
    tolerance_secs: i64,
}

impl Default for StripeSignatureVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StripeSignatureVerifier {
    /// Creates a verifier with the default 5 minute tolerance.
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE_SECS)
    }

    /// Creates a verifier with a custom tolerance. Zero disables the check.
    pub fn with_tolerance(tolerance_secs: u64) -> Self {
        Self {
            tolerance_secs: i64::try_from(tolerance_secs).unwrap_or(i64::MAX),
        }
    }

    /// Verifies against an explicit clock, `now` being a Unix timestamp.
    pub fn verify_at(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
        secret: &SecretString,
        now: i64,
    ) -> Result<StripeEvent, WebhookError> {
        let header = signature_header.ok_or(WebhookError::MissingSignatureHeader)?;
        let header = SignatureHeader::parse(header)?;

        let expected = compute_signature(secret.expose_secret(), header.timestamp, payload);
        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(expected.as_bytes(), candidate.as_bytes()));
        if !matched {
            return Err(WebhookError::NoMatchingSignature);
        }

        if self.tolerance_secs > 0 && header.timestamp < now.saturating_sub(self.tolerance_secs) {
            return Err(WebhookError::TimestampOutsideTolerance);
        }

        serde_json::from_slice(payload).map_err(|e| WebhookError::InvalidPayload(e.to_string()))
    }
}

#[async_trait]
impl EventVerifier for StripeSignatureVerifier {
    async fn verify(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
        secret: &SecretString,
    ) -> Result<StripeEvent, WebhookError> {
        let result = self.verify_at(
            payload,
            signature_header,
            secret,
            chrono::Utc::now().timestamp(),
        );

        match &result {
            Ok(event) => tracing::debug!(
                event_id = %event.id,
                event_type = %event.event_type,
                "Webhook signature verified"
            ),
            Err(e) => tracing::warn!(error = %e, "Webhook verification failed"),
        }

        result
    }
}

/// Computes the hex-encoded v1 signature Stripe would send for `payload`.
///
/// The body is fed to the MAC as raw bytes, never re-encoded.
pub fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Builds a complete `Stripe-Signature` header value for `payload`.
pub fn build_signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    format!(
        "t={},v1={}",
        timestamp,
        compute_signature(secret, timestamp, payload)
    )
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_SECRET: &str = "whsec_test_secret_12345";
    const NOW: i64 = 1_704_067_200;
    const PAYLOAD: &str = r#"{"id":"evt_test123","type":"checkout.session.completed","created":1704067200,"data":{"object":{}},"livemode":false,"api_version":"2023-10-16"}"#;

    fn secret() -> SecretString {
        SecretString::new(TEST_SECRET.to_string())
    }

    // ══════════════════════════════════════════════════════════════
    // Signature Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_valid_signature() {
        let verifier = StripeSignatureVerifier::new();
        let header = build_signature_header(TEST_SECRET, NOW, PAYLOAD.as_bytes());

        let event = verifier
            .verify_at(PAYLOAD.as_bytes(), Some(&header), &secret(), NOW)
            .unwrap();

        assert_eq!(event.id, "evt_test123");
        assert_eq!(event.event_type, "checkout.session.completed");
    }

    #[test]
    fn verify_missing_header_fails() {
        let verifier = StripeSignatureVerifier::new();

        let result = verifier.verify_at(PAYLOAD.as_bytes(), None, &secret(), NOW);

        assert_eq!(result.unwrap_err(), WebhookError::MissingSignatureHeader);
    }

    #[test]
    fn verify_malformed_header_fails() {
        let verifier = StripeSignatureVerifier::new();

        let result =
            verifier.verify_at(PAYLOAD.as_bytes(), Some("malformed_header"), &secret(), NOW);

        assert_eq!(result.unwrap_err(), WebhookError::MalformedSignatureHeader);
    }

    #[test]
    fn verify_invalid_signature_fails() {
        let verifier = StripeSignatureVerifier::new();
        let header = format!("t={},v1={}", NOW, "a".repeat(64));

        let result = verifier.verify_at(PAYLOAD.as_bytes(), Some(&header), &secret(), NOW);

        assert_eq!(result.unwrap_err(), WebhookError::NoMatchingSignature);
    }

    #[test]
    fn verify_wrong_secret_fails() {
        let verifier = StripeSignatureVerifier::new();
        let header = build_signature_header("whsec_other", NOW, PAYLOAD.as_bytes());

        let result = verifier.verify_at(PAYLOAD.as_bytes(), Some(&header), &secret(), NOW);

        assert_eq!(result.unwrap_err(), WebhookError::NoMatchingSignature);
    }

    #[test]
    fn verify_tampered_payload_fails() {
        let verifier = StripeSignatureVerifier::new();
        let header = build_signature_header(TEST_SECRET, NOW, PAYLOAD.as_bytes());
        let tampered = PAYLOAD.replace("evt_test123", "evt_hacked");

        let result = verifier.verify_at(tampered.as_bytes(), Some(&header), &secret(), NOW);

        assert_eq!(result.unwrap_err(), WebhookError::NoMatchingSignature);
    }

    #[test]
    fn verify_accepts_any_matching_v1_during_secret_rotation() {
        let verifier = StripeSignatureVerifier::new();
        let header = format!(
            "t={},v1={},v1={}",
            NOW,
            compute_signature("whsec_old_secret", NOW, PAYLOAD.as_bytes()),
            compute_signature(TEST_SECRET, NOW, PAYLOAD.as_bytes()),
        );

        let result = verifier.verify_at(PAYLOAD.as_bytes(), Some(&header), &secret(), NOW);

        assert!(result.is_ok());
    }

    #[test]
    fn verify_signs_non_utf8_bytes_exactly() {
        let verifier = StripeSignatureVerifier::new();
        let payload: &[u8] = &[0xff, 0xfe, b'{', b'}'];
        let header = build_signature_header(TEST_SECRET, NOW, payload);

        let result = verifier.verify_at(payload, Some(&header), &secret(), NOW);

        // Signature matches; the failure comes from JSON parsing.
        assert!(matches!(result, Err(WebhookError::InvalidPayload(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // Timestamp Tolerance Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_timestamp_at_boundary_succeeds() {
        let verifier = StripeSignatureVerifier::new();
        let signed_at = NOW - 300;
        let header = build_signature_header(TEST_SECRET, signed_at, PAYLOAD.as_bytes());

        let result = verifier.verify_at(PAYLOAD.as_bytes(), Some(&header), &secret(), NOW);

        assert!(result.is_ok());
    }

    #[test]
    fn verify_timestamp_just_past_boundary_fails() {
        let verifier = StripeSignatureVerifier::new();
        let signed_at = NOW - 301;
        let header = build_signature_header(TEST_SECRET, signed_at, PAYLOAD.as_bytes());

        let result = verifier.verify_at(PAYLOAD.as_bytes(), Some(&header), &secret(), NOW);

        assert_eq!(result.unwrap_err(), WebhookError::TimestampOutsideTolerance);
    }

    #[test]
    fn verify_zero_tolerance_disables_age_check() {
        let verifier = StripeSignatureVerifier::with_tolerance(0);
        let header = build_signature_header(TEST_SECRET, 1, PAYLOAD.as_bytes());

        let result = verifier.verify_at(PAYLOAD.as_bytes(), Some(&header), &secret(), NOW);

        assert!(result.is_ok());
    }

    #[test]
    fn verify_future_timestamp_is_accepted() {
        let verifier = StripeSignatureVerifier::new();
        let header = build_signature_header(TEST_SECRET, NOW + 600, PAYLOAD.as_bytes());

        let result = verifier.verify_at(PAYLOAD.as_bytes(), Some(&header), &secret(), NOW);

        assert!(result.is_ok());
    }

    // ══════════════════════════════════════════════════════════════
    // JSON Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_invalid_json_fails_after_signature_check() {
        let verifier = StripeSignatureVerifier::new();
        let payload = b"not valid json";
        let header = build_signature_header(TEST_SECRET, NOW, payload);

        let result = verifier.verify_at(payload, Some(&header), &secret(), NOW);

        assert!(matches!(result, Err(WebhookError::InvalidPayload(_))));
    }

    #[tokio::test]
    async fn port_verify_uses_wall_clock() {
        let verifier = StripeSignatureVerifier::new();
        let now = chrono::Utc::now().timestamp();
        let header = build_signature_header(TEST_SECRET, now, PAYLOAD.as_bytes());

        let event = verifier
            .verify(PAYLOAD.as_bytes(), Some(&header), &secret())
            .await
            .unwrap();

        assert_eq!(event.id, "evt_test123");
    }

    // ══════════════════════════════════════════════════════════════
    // Constant Time Comparison Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_equal_values() {
        assert!(constant_time_compare(b"abcdef", b"abcdef"));
    }

    #[test]
    fn constant_time_compare_different_lengths() {
        assert!(!constant_time_compare(b"abc", b"abcd"));
    }

    proptest! {
        #[test]
        fn any_single_byte_change_is_rejected(index in 0usize..PAYLOAD.len(), byte in any::<u8>()) {
            let original = PAYLOAD.as_bytes();
            prop_assume!(original[index] != byte);

            let mut tampered = original.to_vec();
            tampered[index] = byte;
            let header = build_signature_header(TEST_SECRET, NOW, original);

            let result = StripeSignatureVerifier::new()
                .verify_at(&tampered, Some(&header), &secret(), NOW);

            prop_assert_eq!(result.unwrap_err(), WebhookError::NoMatchingSignature);
        }
    }
}
