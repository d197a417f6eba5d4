//! Order records for one-time payments.
//!
//! Orders are append-only projections of completed checkout sessions. A row
//! is created once, on receipt of a paid `payment`-mode completion event, and
//! never updated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }
}

/// An order ready for insertion, mapped from a completed session payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub checkout_session_id: String,
    pub payment_intent_id: Option<String>,
    pub customer_id: String,
    pub amount_subtotal: i64,
    pub amount_total: i64,
    pub currency: String,
    pub payment_status: String,
    pub status: OrderStatus,
}

/// A persisted order.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub checkout_session_id: String,
    pub payment_intent_id: Option<String>,
    pub customer_id: String,
    pub amount_subtotal: i64,
    pub amount_total: i64,
    pub currency: String,
    pub payment_status: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_through_strings() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Completed,
            OrderStatus::Canceled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("refunded"), None);
    }
}
