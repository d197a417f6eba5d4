//! Provider webhook event envelope and routing types.
//!
//! Routing is done over a closed sum type rather than free-form string
//! comparison, so adding a new handled kind forces every match site to be
//! revisited.

use serde::{Deserialize, Serialize};

use crate::domain::checkout::CheckoutMode;

/// A verified webhook event from the payment provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Raw event type string (e.g. "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    pub created: i64,

    /// Event payload container.
    pub data: EventData,

    /// Whether this is a live-mode event.
    pub livemode: bool,

    /// API version the event was rendered with.
    #[serde(default)]
    pub api_version: Option<String>,
}

/// Container for the event's affected object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventData {
    /// The object that triggered the event (shape depends on event type).
    pub object: serde_json::Value,
}

impl ProviderEvent {
    /// Classify the event's type string.
    pub fn kind(&self) -> EventKind {
        EventKind::from_type(&self.event_type)
    }

    /// Customer id carried by the event object, if any.
    ///
    /// Checkout sessions, subscriptions, and invoices all carry a top-level
    /// `customer` field.
    pub fn customer_id(&self) -> Option<String> {
        self.data
            .object
            .get("customer")
            .and_then(|v| v.as_str())
            .map(String::from)
    }

    /// Deserialize the event object as a checkout session payload.
    pub fn checkout_session(&self) -> Result<CheckoutSessionObject, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// Closed classification of provider event types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// `checkout.session.completed`
    CheckoutSessionCompleted,
    /// Any `customer.subscription.*` event.
    CustomerSubscription(SubscriptionEventKind),
    /// `invoice.payment_succeeded`
    InvoicePaymentSucceeded,
    /// Any other event type; acknowledged and ignored.
    Unrecognized(String),
}

/// The specific subscription lifecycle event, when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionEventKind {
    Created,
    Updated,
    Deleted,
    Paused,
    Resumed,
    TrialWillEnd,
    /// A `customer.subscription.*` suffix we do not enumerate; still routed
    /// to the synchronizer.
    Other(String),
}

impl EventKind {
    /// Classify a raw provider type string.
    pub fn from_type(event_type: &str) -> Self {
        if event_type == "checkout.session.completed" {
            return Self::CheckoutSessionCompleted;
        }
        if event_type == "invoice.payment_succeeded" {
            return Self::InvoicePaymentSucceeded;
        }
        if let Some(rest) = event_type.strip_prefix("customer.subscription.") {
            let kind = match rest {
                "created" => SubscriptionEventKind::Created,
                "updated" => SubscriptionEventKind::Updated,
                "deleted" => SubscriptionEventKind::Deleted,
                "paused" => SubscriptionEventKind::Paused,
                "resumed" => SubscriptionEventKind::Resumed,
                "trial_will_end" => SubscriptionEventKind::TrialWillEnd,
                other => SubscriptionEventKind::Other(other.to_string()),
            };
            return Self::CustomerSubscription(kind);
        }
        Self::Unrecognized(event_type.to_string())
    }
}

/// Checkout session fields we read from `checkout.session.completed` events.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionObject {
    /// Session id (cs_...).
    pub id: String,

    /// Session mode string ("payment", "subscription", "setup").
    pub mode: String,

    /// Session payment status ("paid", "unpaid", "no_payment_required").
    pub payment_status: String,

    /// Customer id if one was created or attached.
    #[serde(default)]
    pub customer: Option<String>,

    /// Payment intent id for payment-mode sessions.
    #[serde(default)]
    pub payment_intent: Option<String>,

    #[serde(default)]
    pub amount_subtotal: Option<i64>,

    #[serde(default)]
    pub amount_total: Option<i64>,

    #[serde(default)]
    pub currency: Option<String>,
}

impl CheckoutSessionObject {
    /// The session mode, when it is one of the two modes we sell under.
    pub fn checkout_mode(&self) -> Option<CheckoutMode> {
        CheckoutMode::parse(&self.mode)
    }

    /// True for a paid, payment-mode session (the order-recording case).
    pub fn is_paid_one_time_payment(&self) -> bool {
        self.checkout_mode() == Some(CheckoutMode::Payment) && self.payment_status == "paid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event_with_type(event_type: &str, object: serde_json::Value) -> ProviderEvent {
        ProviderEvent {
            id: "evt_test".to_string(),
            event_type: event_type.to_string(),
            created: 1704067200,
            data: EventData { object },
            livemode: false,
            api_version: Some("2023-10-16".to_string()),
        }
    }

    #[test]
    fn deserialize_minimal_event() {
        let json = r#"{
            "id": "evt_1234567890",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": { "object": {} },
            "livemode": false,
            "api_version": "2023-10-16"
        }"#;

        let event: ProviderEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, "evt_1234567890");
        assert_eq!(event.kind(), EventKind::CheckoutSessionCompleted);
        assert!(!event.livemode);
    }

    #[test]
    fn deserialize_event_without_api_version() {
        let json = r#"{
            "id": "evt_x",
            "type": "invoice.payment_succeeded",
            "created": 1704067200,
            "data": { "object": {"customer": "cus_1"} },
            "livemode": true
        }"#;

        let event: ProviderEvent = serde_json::from_str(json).unwrap();

        assert!(event.api_version.is_none());
        assert_eq!(event.customer_id().as_deref(), Some("cus_1"));
    }

    #[test]
    fn kind_classifies_subscription_events() {
        assert_eq!(
            EventKind::from_type("customer.subscription.updated"),
            EventKind::CustomerSubscription(SubscriptionEventKind::Updated)
        );
        assert_eq!(
            EventKind::from_type("customer.subscription.deleted"),
            EventKind::CustomerSubscription(SubscriptionEventKind::Deleted)
        );
        assert_eq!(
            EventKind::from_type("customer.subscription.paused"),
            EventKind::CustomerSubscription(SubscriptionEventKind::Paused)
        );
        // A suffix we never enumerated still routes to the subscription track
        assert_eq!(
            EventKind::from_type("customer.subscription.pending_update_applied"),
            EventKind::CustomerSubscription(SubscriptionEventKind::Other(
                "pending_update_applied".to_string()
            ))
        );
    }

    #[test]
    fn kind_classifies_unrelated_events_as_unrecognized() {
        assert_eq!(
            EventKind::from_type("payment_intent.succeeded"),
            EventKind::Unrecognized("payment_intent.succeeded".to_string())
        );
        // customer.* without the subscription prefix is not a subscription event
        assert_eq!(
            EventKind::from_type("customer.created"),
            EventKind::Unrecognized("customer.created".to_string())
        );
    }

    #[test]
    fn checkout_session_parses_from_event_object() {
        let event = event_with_type(
            "checkout.session.completed",
            json!({
                "id": "cs_test_abc",
                "mode": "payment",
                "payment_status": "paid",
                "customer": "cus_xyz",
                "payment_intent": "pi_123",
                "amount_subtotal": 49900,
                "amount_total": 49900,
                "currency": "usd"
            }),
        );

        let session = event.checkout_session().unwrap();

        assert_eq!(session.id, "cs_test_abc");
        assert!(session.is_paid_one_time_payment());
        assert_eq!(session.customer.as_deref(), Some("cus_xyz"));
        assert_eq!(session.amount_total, Some(49900));
    }

    #[test]
    fn unpaid_payment_session_is_not_recordable() {
        let session = CheckoutSessionObject {
            id: "cs_1".to_string(),
            mode: "payment".to_string(),
            payment_status: "unpaid".to_string(),
            customer: None,
            payment_intent: None,
            amount_subtotal: None,
            amount_total: None,
            currency: None,
        };
        assert!(!session.is_paid_one_time_payment());
    }

    #[test]
    fn subscription_session_is_not_recordable() {
        let session = CheckoutSessionObject {
            id: "cs_2".to_string(),
            mode: "subscription".to_string(),
            payment_status: "paid".to_string(),
            customer: Some("cus_1".to_string()),
            payment_intent: None,
            amount_subtotal: None,
            amount_total: None,
            currency: None,
        };
        assert!(!session.is_paid_one_time_payment());
        assert_eq!(session.checkout_mode(), Some(CheckoutMode::Subscription));
    }

    #[test]
    fn customer_id_absent_when_object_has_none() {
        let event = event_with_type("customer.subscription.updated", json!({"id": "sub_1"}));
        assert!(event.customer_id().is_none());
    }
}
