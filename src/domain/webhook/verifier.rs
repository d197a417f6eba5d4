//! Webhook signature verification.
//!
//! Authenticates inbound provider callbacks with HMAC-SHA256 over the raw
//! request body, per Stripe's signing scheme: the `stripe-signature` header
//! carries `t=<unix_ts>,v1=<hex hmac>` and the MAC is computed over
//! `"{timestamp}.{body}"`. Timestamps outside a short window are rejected to
//! blunt replay.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;
use super::event::ProviderEvent;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed event age (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Tolerated clock skew for timestamps in the future (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components of the signature header.
///
/// Format: `t=<timestamp>,v1=<signature>[,v0=<legacy>]`; unknown fields are
/// ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parse a signature header string.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MalformedHeader` when the header is empty,
    /// a component is not `key=value`, the timestamp is not an integer, or
    /// the v1 signature is not valid hex.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        if header.trim().is_empty() {
            return Err(WebhookError::MissingSignature);
        }

        let mut timestamp: Option<i64> = None;
        let mut v1_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                WebhookError::MalformedHeader("expected key=value components".to_string())
            })?;

            match key.trim() {
                "t" => {
                    timestamp = Some(value.trim().parse().map_err(|_| {
                        WebhookError::MalformedHeader("invalid timestamp".to_string())
                    })?);
                }
                "v1" => {
                    v1_signature = Some(decode_hex(value.trim()).ok_or_else(|| {
                        WebhookError::MalformedHeader("v1 signature is not valid hex".to_string())
                    })?);
                }
                _ => {}
            }
        }

        Ok(Self {
            timestamp: timestamp.ok_or_else(|| {
                WebhookError::MalformedHeader("missing timestamp".to_string())
            })?,
            v1_signature: v1_signature.ok_or_else(|| {
                WebhookError::MalformedHeader("missing v1 signature".to_string())
            })?,
        })
    }
}

/// Verifier holding the pre-shared signing secret.
pub struct WebhookVerifier {
    secret: SecretString,
    require_livemode: bool,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            require_livemode: false,
        }
    }

    /// Reject test-mode events (set in production).
    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }

    /// Verify the signature over the raw body and parse the event.
    ///
    /// Verification order: parse the header, validate the timestamp window,
    /// compare the HMAC in constant time, then parse the JSON payload. The
    /// payload is only deserialized after the signature checks out.
    ///
    /// # Errors
    ///
    /// Any [`WebhookError`]; all of them mean the request must be rejected
    /// without further processing.
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<ProviderEvent, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        self.check_timestamp(header.timestamp)?;

        let expected = self.compute_signature(header.timestamp, payload);
        if expected.len() != header.v1_signature.len()
            || expected.ct_eq(&header.v1_signature).unwrap_u8() != 1
        {
            return Err(WebhookError::InvalidSignature);
        }

        let event: ProviderEvent = serde_json::from_slice(payload)
            .map_err(|e| WebhookError::InvalidPayload(e.to_string()))?;

        if self.require_livemode && !event.livemode {
            return Err(WebhookError::TestModeRejected);
        }

        Ok(event)
    }

    fn check_timestamp(&self, timestamp: i64) -> Result<(), WebhookError> {
        let age = chrono::Utc::now().timestamp() - timestamp;
        if age > MAX_EVENT_AGE_SECS {
            return Err(WebhookError::TimestampTooOld);
        }
        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(WebhookError::TimestampInFuture);
        }
        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(signed_payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.is_empty() || hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

/// Compute a hex-encoded signature for test fixtures.
#[cfg(test)]
pub fn sign_for_tests(secret: &str, timestamp: i64, payload: &str) -> String {
    let signed_payload = format!("{}.{}", timestamp, payload);
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(signed_payload.as_bytes());
    mac.finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
