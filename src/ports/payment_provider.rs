//! Payment provider port.
//!
//! Contract for the hosted-checkout provider (Stripe in production). The
//! service never holds payment state of its own; it creates sessions and
//! reads subscription state back through this port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::checkout::CheckoutRequest;
use crate::domain::subscription::SubscriptionStatus;

/// Port for the payment provider.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a hosted checkout session and return its redirect URL.
    ///
    /// No local state is written; everything lives with the provider until a
    /// webhook arrives.
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<HostedCheckout, PaymentError>;

    /// Fetch the customer's most recent subscription, any status, with the
    /// default payment method expanded. `None` when the customer has no
    /// subscription on record.
    async fn latest_subscription(
        &self,
        customer_id: &str,
    ) -> Result<Option<CustomerSubscription>, PaymentError>;
}

/// A provider-hosted checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedCheckout {
    /// Provider session id (cs_...).
    pub session_id: String,
    /// URL the browser is redirected to.
    pub url: String,
}

/// Subscription state as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSubscription {
    pub id: String,
    pub price_id: Option<String>,
    pub status: SubscriptionStatus,
    pub current_period_start: i64,
    pub current_period_end: i64,
    pub cancel_at_period_end: bool,
    /// Card summary from the expanded default payment method, when present.
    pub payment_method: Option<CardSummary>,
}

/// Card brand and last four digits for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSummary {
    pub brand: String,
    pub last4: String,
}

/// Error from a payment provider operation.
#[derive(Debug, Clone)]
pub struct PaymentError {
    pub code: PaymentErrorCode,
    pub message: String,
}

/// Provider error categories. Each maps onto a fixed user-facing message so
/// raw provider errors never leak to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentErrorCode {
    /// The configured API key was rejected.
    InvalidApiKey,
    /// The price id does not exist on the provider side.
    UnknownPrice,
    /// Transport-level failure reaching the provider.
    Network,
    /// Any other provider error.
    Provider,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Network, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Provider, message)
    }

    /// Fixed user-facing message for this error category.
    pub fn user_message(&self) -> &'static str {
        match self.code {
            PaymentErrorCode::InvalidApiKey => {
                "Payment system is not properly configured. Please contact support."
            }
            PaymentErrorCode::UnknownPrice => "Invalid price ID provided. Please contact support.",
            PaymentErrorCode::Network | PaymentErrorCode::Provider => {
                "An error occurred while creating the checkout session. Please try again or contact support."
            }
        }
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}
