//! CRM connector port.
//!
//! Lead forwarding is advisory: the local row is the durable outcome and a
//! CRM failure must never fail the request that created it.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::lead::Lead;

/// Error from the CRM connector.
#[derive(Debug, Error)]
pub enum CrmError {
    #[error("network error: {0}")]
    Network(String),

    #[error("CRM API error (status {status}): {body}")]
    Api { status: u16, body: String },
}

/// Port for forwarding captured leads to an external CRM.
#[async_trait]
pub trait CrmConnector: Send + Sync {
    /// Forward a persisted lead. Best effort; callers log and move on.
    async fn push_lead(&self, lead: &Lead) -> Result<(), CrmError>;
}
