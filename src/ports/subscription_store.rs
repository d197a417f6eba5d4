//! Subscription mirror store port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::subscription::SubscriptionMirror;

/// Error from the subscription mirror store.
#[derive(Debug, Error)]
pub enum SubscriptionStoreError {
    #[error("database error: {0}")]
    Database(String),
}

/// Store holding at most one mirror row per customer.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Insert or overwrite the mirror row for the customer (last write wins).
    async fn upsert(&self, mirror: &SubscriptionMirror) -> Result<(), SubscriptionStoreError>;
}
