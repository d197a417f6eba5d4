//! Lead store port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::lead::{Lead, NewLead};

/// Error from the lead store.
///
/// `DuplicateEmail` is distinguishable from generic failure so the HTTP
/// layer can answer with a conflict rather than a 500.
#[derive(Debug, Error)]
pub enum LeadStoreError {
    #[error("This email is already registered")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(String),
}

/// Store for contact-form leads with a uniqueness constraint on email.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Insert a lead and return it with its assigned id.
    async fn insert(&self, lead: &NewLead) -> Result<Lead, LeadStoreError>;
}
