//! Subscription mirror types.
//!
//! The mirror is a local, last-write-wins projection of the provider's
//! subscription state, keyed by customer id (at most one row per customer).
//! The provider remains the source of record.

use serde::{Deserialize, Serialize};

/// Subscription status as mirrored from the provider.
///
/// `NotStarted` is local-only: it marks a customer for whom the provider
/// reports no subscription at all (never subscribed, or fully expired).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    NotStarted,
    Incomplete,
    IncompleteExpired,
    Trialing,
    Active,
    PastDue,
    Canceled,
    Unpaid,
    Paused,
    /// Status string the provider sent that we do not recognize.
    Unknown,
}

impl SubscriptionStatus {
    /// Map a provider status string onto the mirror status.
    pub fn from_provider(s: &str) -> Self {
        match s {
            "incomplete" => Self::Incomplete,
            "incomplete_expired" => Self::IncompleteExpired,
            "trialing" => Self::Trialing,
            "active" => Self::Active,
            "past_due" => Self::PastDue,
            "canceled" => Self::Canceled,
            "unpaid" => Self::Unpaid,
            "paused" => Self::Paused,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Incomplete => "incomplete",
            Self::IncompleteExpired => "incomplete_expired",
            Self::Trialing => "trialing",
            Self::Active => "active",
            Self::PastDue => "past_due",
            Self::Canceled => "canceled",
            Self::Unpaid => "unpaid",
            Self::Paused => "paused",
            Self::Unknown => "unknown",
        }
    }
}

/// Local mirror row for a customer's subscription state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionMirror {
    pub customer_id: String,
    pub subscription_id: Option<String>,
    pub price_id: Option<String>,
    pub current_period_start: Option<i64>,
    pub current_period_end: Option<i64>,
    pub cancel_at_period_end: bool,
    pub payment_method_brand: Option<String>,
    pub payment_method_last4: Option<String>,
    pub status: SubscriptionStatus,
}

impl SubscriptionMirror {
    /// Mirror row for a customer with no subscription on the provider side.
    ///
    /// Overwrites any previous state for the customer, reconciling
    /// cancellations and expirations.
    pub fn not_started(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            subscription_id: None,
            price_id: None,
            current_period_start: None,
            current_period_end: None,
            cancel_at_period_end: false,
            payment_method_brand: None,
            payment_method_last4: None,
            status: SubscriptionStatus::NotStarted,
        }
    }
}
