//! Checkout request validation.
//!
//! A checkout request is transient: it is validated per click and handed to
//! the payment provider, never persisted locally.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payment mode requested for a checkout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    /// One-time payment.
    Payment,
    /// Recurring subscription.
    Subscription,
}

impl CheckoutMode {
    /// Parse a provider mode string. Only the two literals are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "payment" => Some(Self::Payment),
            "subscription" => Some(Self::Subscription),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Subscription => "subscription",
        }
    }
}

/// Validation failure for a checkout request. Each variant names the
/// offending field so the client can correct it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutValidationError {
    #[error("Missing required parameter {0}")]
    MissingParameter(&'static str),

    #[error("Expected parameter mode to be one of payment, subscription")]
    InvalidMode,
}

/// A validated request to create a hosted checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub price_id: String,
    pub mode: CheckoutMode,
    pub success_url: String,
    pub cancel_url: String,
    pub customer_email: Option<String>,
}

impl CheckoutRequest {
    /// Validate raw request fields into a `CheckoutRequest`.
    ///
    /// All of `price_id`, `mode`, `success_url`, `cancel_url` must be present
    /// and non-empty; `mode` must be exactly `payment` or `subscription`.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutValidationError`] naming the first offending field.
    pub fn validate(
        price_id: Option<&str>,
        mode: Option<&str>,
        success_url: Option<&str>,
        cancel_url: Option<&str>,
        customer_email: Option<&str>,
    ) -> Result<Self, CheckoutValidationError> {
        let price_id = require(price_id, "price_id")?;
        let mode = require(mode, "mode")?;
        let success_url = require(success_url, "success_url")?;
        let cancel_url = require(cancel_url, "cancel_url")?;

        let mode = CheckoutMode::parse(mode).ok_or(CheckoutValidationError::InvalidMode)?;

        Ok(Self {
            price_id: price_id.to_string(),
            mode,
            success_url: success_url.to_string(),
            cancel_url: cancel_url.to_string(),
            customer_email: customer_email
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        })
    }
}

fn require<'a>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, CheckoutValidationError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(CheckoutValidationError::MissingParameter(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> (
        Option<&'static str>,
        Option<&'static str>,
        Option<&'static str>,
        Option<&'static str>,
    ) {
        (
            Some("price_123"),
            Some("payment"),
            Some("https://example.com/success"),
            Some("https://example.com/"),
        )
    }

    #[test]
    fn validate_accepts_payment_mode() {
        let (price, mode, success, cancel) = valid_fields();
        let request = CheckoutRequest::validate(price, mode, success, cancel, None).unwrap();

        assert_eq!(request.price_id, "price_123");
        assert_eq!(request.mode, CheckoutMode::Payment);
        assert!(request.customer_email.is_none());
    }

    #[test]
    fn validate_accepts_subscription_mode() {
        let (price, _, success, cancel) = valid_fields();
        let request =
            CheckoutRequest::validate(price, Some("subscription"), success, cancel, None).unwrap();

        assert_eq!(request.mode, CheckoutMode::Subscription);
    }

    #[test]
    fn validate_missing_price_id_names_field() {
        let (_, mode, success, cancel) = valid_fields();
        let err = CheckoutRequest::validate(None, mode, success, cancel, None).unwrap_err();

        assert_eq!(err, CheckoutValidationError::MissingParameter("price_id"));
        assert!(err.to_string().contains("price_id"));
    }

    #[test]
    fn validate_blank_success_url_names_field() {
        let (price, mode, _, cancel) = valid_fields();
        let err = CheckoutRequest::validate(price, mode, Some("  "), cancel, None).unwrap_err();

        assert_eq!(
            err,
            CheckoutValidationError::MissingParameter("success_url")
        );
    }

    #[test]
    fn validate_missing_cancel_url_names_field() {
        let (price, mode, success, _) = valid_fields();
        let err = CheckoutRequest::validate(price, mode, success, None, None).unwrap_err();

        assert_eq!(err, CheckoutValidationError::MissingParameter("cancel_url"));
    }

    #[test]
    fn validate_rejects_unknown_mode() {
        let (price, _, success, cancel) = valid_fields();
        let err =
            CheckoutRequest::validate(price, Some("setup"), success, cancel, None).unwrap_err();

        assert_eq!(err, CheckoutValidationError::InvalidMode);
    }

    #[test]
    fn validate_missing_mode_is_reported_as_missing() {
        let (price, _, success, cancel) = valid_fields();
        let err = CheckoutRequest::validate(price, None, success, cancel, None).unwrap_err();

        assert_eq!(err, CheckoutValidationError::MissingParameter("mode"));
    }

    #[test]
    fn validate_trims_and_keeps_customer_email() {
        let (price, mode, success, cancel) = valid_fields();
        let request =
            CheckoutRequest::validate(price, mode, success, cancel, Some(" jane@example.com "))
                .unwrap();

        assert_eq!(request.customer_email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn validate_drops_blank_customer_email() {
        let (price, mode, success, cancel) = valid_fields();
        let request =
            CheckoutRequest::validate(price, mode, success, cancel, Some("   ")).unwrap();

        assert!(request.customer_email.is_none());
    }

    #[test]
    fn mode_roundtrips_through_strings() {
        for mode in [CheckoutMode::Payment, CheckoutMode::Subscription] {
            assert_eq!(CheckoutMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(CheckoutMode::parse("setup"), None);
    }
}
