//! Webhook ingestion domain: signature verification and event typing.

mod errors;
mod event;
mod verifier;

pub use errors::WebhookError;
pub use event::{
    CheckoutSessionObject, EventData, EventKind, ProviderEvent, SubscriptionEventKind,
};
pub use verifier::{SignatureHeader, WebhookVerifier};
