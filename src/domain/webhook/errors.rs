//! Webhook verification errors.

use thiserror::Error;

/// Failure while authenticating or parsing an inbound webhook.
///
/// Any of these causes the request to be rejected with 400 before the
/// dispatcher runs; this is the sole trust boundary for inbound events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    #[error("No signature found")]
    MissingSignature,

    #[error("Invalid signature header: {0}")]
    MalformedHeader(String),

    #[error("Webhook signature verification failed")]
    InvalidSignature,

    #[error("Event timestamp is too old")]
    TimestampTooOld,

    #[error("Event timestamp is in the future")]
    TimestampInFuture,

    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),

    #[error("Test mode events are not accepted")]
    TestModeRejected,
}
