//! Lead intake.
//!
//! The local insert is the durable outcome; CRM forwarding afterwards is
//! best effort and never fails the request.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::lead::{Lead, LeadValidationError, NewLead};
use crate::ports::{CrmConnector, LeadStore, LeadStoreError};

/// Raw contact-form fields as they arrive from the browser.
#[derive(Debug, Clone, Default)]
pub struct SubmitLeadCommand {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
}

/// Error submitting a lead.
#[derive(Debug, Error)]
pub enum SubmitLeadError {
    #[error(transparent)]
    Validation(#[from] LeadValidationError),

    #[error("This email is already registered")]
    DuplicateEmail,

    #[error("Failed to save lead information")]
    Store(String),
}

impl From<LeadStoreError> for SubmitLeadError {
    fn from(err: LeadStoreError) -> Self {
        match err {
            LeadStoreError::DuplicateEmail => Self::DuplicateEmail,
            LeadStoreError::Database(msg) => Self::Store(msg),
        }
    }
}

/// Validates, persists, and forwards a lead submission.
pub struct SubmitLeadHandler {
    leads: Arc<dyn LeadStore>,
    crm: Arc<dyn CrmConnector>,
}

impl SubmitLeadHandler {
    pub fn new(leads: Arc<dyn LeadStore>, crm: Arc<dyn CrmConnector>) -> Self {
        Self { leads, crm }
    }

    /// Validate, insert, then forward to the CRM.
    ///
    /// # Errors
    ///
    /// - `Validation` when required fields are missing or the email is malformed
    /// - `DuplicateEmail` when the email is already on file
    /// - `Store` on any other database failure
    pub async fn handle(&self, cmd: SubmitLeadCommand) -> Result<Lead, SubmitLeadError> {
        let new_lead = NewLead::validate(
            cmd.name.as_deref(),
            cmd.email.as_deref(),
            cmd.phone.as_deref(),
            cmd.source.as_deref(),
        )?;

        let lead = self.leads.insert(&new_lead).await?;

        tracing::info!(lead_id = lead.id, source = %lead.source, "Lead saved");

        if let Err(e) = self.crm.push_lead(&lead).await {
            tracing::warn!(lead_id = lead.id, error = %e, "CRM sync failed; lead kept locally");
        }

        Ok(lead)
    }
}
