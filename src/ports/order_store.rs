//! Order store port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::order::NewOrder;

/// Outcome of an order insert.
///
/// Duplicate webhook deliveries are expected; replays of an already-recorded
/// session are surfaced explicitly rather than silently inserting twice or
/// failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderInsert {
    /// A new row was written.
    Inserted,
    /// A row with this checkout session id already exists; nothing written.
    AlreadyRecorded,
}

/// Error from the order store.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    #[error("database error: {0}")]
    Database(String),
}

/// Append-only store for one-time payment orders, keyed by checkout session id.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert an order; a session id already on file yields
    /// [`OrderInsert::AlreadyRecorded`] and leaves the existing row untouched.
    async fn insert(&self, order: &NewOrder) -> Result<OrderInsert, OrderStoreError>;
}
