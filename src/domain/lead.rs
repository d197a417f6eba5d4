//! Lead capture domain types.
//!
//! A lead is a contact-form submission. Validation and normalization happen
//! here, before any store or CRM adapter sees the data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default attribution when the form does not carry a source.
pub const DEFAULT_SOURCE: &str = "website";

/// Validation failure for a lead submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email format")]
    InvalidEmail,
}

/// A validated, normalized lead ready for insertion.
///
/// All fields are trimmed; the email is lowercased so the store's uniqueness
/// constraint treats `Jane@…` and `jane@…` as the same contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
}

impl NewLead {
    /// Validate and normalize raw form fields.
    ///
    /// # Errors
    ///
    /// - [`LeadValidationError::MissingField`] when name, email, or phone is
    ///   absent or blank
    /// - [`LeadValidationError::InvalidEmail`] when the email fails the basic
    ///   shape check
    pub fn validate(
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        source: Option<&str>,
    ) -> Result<Self, LeadValidationError> {
        let name = require(name, "name")?;
        let email = require(email, "email")?;
        let phone = require(phone, "phone")?;

        let email = email.trim().to_lowercase();
        if !email_has_valid_shape(&email) {
            return Err(LeadValidationError::InvalidEmail);
        }

        let source = source
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SOURCE);

        Ok(Self {
            name: name.trim().to_string(),
            email,
            phone: phone.trim().to_string(),
            source: source.to_string(),
        })
    }

}

/// A persisted lead with its assigned id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl Lead {
    /// First word of the name, for CRM contact mapping.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Everything after the first word, joined back together.
    pub fn last_name(&self) -> String {
        self.name
            .split_whitespace()
            .skip(1)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Basic email shape check: one `@` with a non-empty local part, a domain
/// containing a dot, and no whitespace anywhere.
fn email_has_valid_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let Some(domain) = parts.next() else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Domain needs an interior dot
    let (head, tail) = match domain.rsplit_once('.') {
        Some(split) => split,
        None => return false,
    };
    !head.is_empty() && !tail.is_empty()
}

fn require<'a>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, LeadValidationError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(LeadValidationError::MissingField(field)),
    }
}
