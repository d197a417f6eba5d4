//! Verified-event dispatcher.
//!
//! Routes a verified provider event to the order recorder or the
//! subscription synchronizer. Runs on the background worker, after the HTTP
//! acknowledgement has already been sent.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::checkout::CheckoutMode;
use crate::domain::webhook::{EventKind, ProviderEvent};
use crate::ports::{OrderStore, OrderStoreError, PaymentProvider, SubscriptionStore};

use super::record_order::{RecordOrderHandler, RecordOrderResult};
use super::sync_subscription::{SyncError, SyncResult, SyncSubscriptionHandler};

/// Error during background event processing. Logged by the worker; the
/// provider has already been acknowledged, so redelivery is its call.
#[derive(Debug, Error)]
pub enum ProcessEventError {
    #[error("malformed event object: {0}")]
    MalformedObject(String),

    #[error(transparent)]
    OrderStore(#[from] OrderStoreError),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// What the dispatcher did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    OrderRecorded { session_id: String },
    DuplicateOrderIgnored { session_id: String },
    OrderSkipped { session_id: String },
    SubscriptionSynced { customer_id: String },
    Ignored,
}

/// Dispatches verified events by kind.
pub struct ProcessEventHandler {
    record_order: RecordOrderHandler,
    sync_subscription: SyncSubscriptionHandler,
}

impl ProcessEventHandler {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        payment: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            record_order: RecordOrderHandler::new(orders),
            sync_subscription: SyncSubscriptionHandler::new(payment, subscriptions),
        }
    }

    /// Route one event.
    ///
    /// - Paid, payment-mode completed checkouts become orders.
    /// - Subscription-mode completed checkouts, `customer.subscription.*`,
    ///   and `invoice.payment_succeeded` trigger a mirror sync for the
    ///   event's customer.
    /// - Everything else is ignored.
    pub async fn handle(&self, event: &ProviderEvent) -> Result<EventOutcome, ProcessEventError> {
        match event.kind() {
            EventKind::CheckoutSessionCompleted => self.handle_checkout_completed(event).await,
            EventKind::CustomerSubscription(_) | EventKind::InvoicePaymentSucceeded => {
                match event.customer_id() {
                    Some(customer_id) => self.sync(&customer_id).await,
                    None => {
                        tracing::warn!(
                            event_id = %event.id,
                            event_type = %event.event_type,
                            "Subscription event without customer id; ignored"
                        );
                        Ok(EventOutcome::Ignored)
                    }
                }
            }
            EventKind::Unrecognized(event_type) => {
                tracing::debug!(event_id = %event.id, event_type = %event_type, "Unhandled event type");
                Ok(EventOutcome::Ignored)
            }
        }
    }

    async fn handle_checkout_completed(
        &self,
        event: &ProviderEvent,
    ) -> Result<EventOutcome, ProcessEventError> {
        let session = event
            .checkout_session()
            .map_err(|e| ProcessEventError::MalformedObject(e.to_string()))?;

        if session.is_paid_one_time_payment() {
            let outcome = match self.record_order.handle(&session).await? {
                RecordOrderResult::Recorded { session_id } => {
                    EventOutcome::OrderRecorded { session_id }
                }
                RecordOrderResult::DuplicateIgnored { session_id } => {
                    EventOutcome::DuplicateOrderIgnored { session_id }
                }
                RecordOrderResult::SkippedNoCustomer { session_id } => {
                    EventOutcome::OrderSkipped { session_id }
                }
            };
            return Ok(outcome);
        }

        if session.checkout_mode() == Some(CheckoutMode::Subscription) {
            if let Some(customer_id) = &session.customer {
                return self.sync(customer_id).await;
            }
            tracing::warn!(
                session_id = %session.id,
                "Subscription checkout without customer id; ignored"
            );
            return Ok(EventOutcome::Ignored);
        }

        // Unpaid payment-mode sessions and setup-mode sessions fall through.
        tracing::debug!(
            session_id = %session.id,
            mode = %session.mode,
            payment_status = %session.payment_status,
            "Checkout session completion not actionable"
        );
        Ok(EventOutcome::Ignored)
    }

    async fn sync(&self, customer_id: &str) -> Result<EventOutcome, ProcessEventError> {
        match self.sync_subscription.handle(customer_id).await? {
            SyncResult::Synced { .. } | SyncResult::MarkedNotStarted => {
                Ok(EventOutcome::SubscriptionSynced {
                    customer_id: customer_id.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::CheckoutRequest;
    use crate::domain::order::NewOrder;
    use crate::domain::subscription::{SubscriptionMirror, SubscriptionStatus};
    use crate::domain::webhook::EventData;
    use crate::ports::{
        CustomerSubscription, HostedCheckout, OrderInsert, PaymentError,
        SubscriptionStoreError,
    };
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockOrderStore {
        orders: Mutex<Vec<NewOrder>>,
    }

    impl MockOrderStore {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                orders: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl OrderStore for MockOrderStore {
        async fn insert(&self, order: &NewOrder) -> Result<OrderInsert, OrderStoreError> {
            let mut orders = self.orders.lock().unwrap();
            if orders
                .iter()
                .any(|o| o.checkout_session_id == order.checkout_session_id)
            {
                return Ok(OrderInsert::AlreadyRecorded);
            }
            orders.push(order.clone());
            Ok(OrderInsert::Inserted)
        }
    }

    struct MockSubscriptionStore {
        rows: Mutex<HashMap<String, SubscriptionMirror>>,
    }

    impl MockSubscriptionStore {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                rows: Mutex::new(HashMap::new()),
            })
        }
    }

    #[async_trait]
    impl SubscriptionStore for MockSubscriptionStore {
        async fn upsert(&self, mirror: &SubscriptionMirror) -> Result<(), SubscriptionStoreError> {
            self.rows
                .lock()
                .unwrap()
                .insert(mirror.customer_id.clone(), mirror.clone());
            Ok(())
        }
    }

    struct MockPaymentProvider {
        lookups: AtomicUsize,
        subscription: Option<CustomerSubscription>,
    }

    impl MockPaymentProvider {
        fn without_subscriptions() -> Arc<Self> {
            Arc::new(Self {
                lookups: AtomicUsize::new(0),
                subscription: None,
            })
        }
    }

    #[async_trait]
    impl PaymentProvider for MockPaymentProvider {
        async fn create_checkout_session(
            &self,
            _request: &CheckoutRequest,
        ) -> Result<HostedCheckout, PaymentError> {
            unimplemented!("not used in dispatcher tests")
        }

        async fn latest_subscription(
            &self,
            _customer_id: &str,
        ) -> Result<Option<CustomerSubscription>, PaymentError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.subscription.clone())
        }
    }

    fn event(event_type: &str, object: serde_json::Value) -> ProviderEvent {
        ProviderEvent {
            id: "evt_1".to_string(),
            event_type: event_type.to_string(),
            created: 1704067200,
            data: EventData { object },
            livemode: false,
            api_version: None,
        }
    }

    fn handler(
        orders: Arc<MockOrderStore>,
        subs: Arc<MockSubscriptionStore>,
        payment: Arc<MockPaymentProvider>,
    ) -> ProcessEventHandler {
        ProcessEventHandler::new(orders, subs, payment)
    }

    #[tokio::test]
    async fn paid_payment_session_records_exactly_one_order() {
        let orders = MockOrderStore::new();
        let subs = MockSubscriptionStore::new();
        let payment = MockPaymentProvider::without_subscriptions();
        let dispatcher = handler(orders.clone(), subs.clone(), payment.clone());

        let event = event(
            "checkout.session.completed",
            json!({
                "id": "cs_1",
                "mode": "payment",
                "payment_status": "paid",
                "customer": "cus_1",
                "payment_intent": "pi_1",
                "amount_subtotal": 49900,
                "amount_total": 49900,
                "currency": "usd"
            }),
        );

        let outcome = dispatcher.handle(&event).await.unwrap();
        assert_eq!(
            outcome,
            EventOutcome::OrderRecorded {
                session_id: "cs_1".to_string()
            }
        );

        // Replaying the identical event does not produce a second row
        let replay = dispatcher.handle(&event).await.unwrap();
        assert_eq!(
            replay,
            EventOutcome::DuplicateOrderIgnored {
                session_id: "cs_1".to_string()
            }
        );
        assert_eq!(orders.orders.lock().unwrap().len(), 1);

        // The payment track never triggers a subscription lookup
        assert_eq!(payment.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unpaid_payment_session_is_ignored() {
        let orders = MockOrderStore::new();
        let subs = MockSubscriptionStore::new();
        let dispatcher = handler(
            orders.clone(),
            subs,
            MockPaymentProvider::without_subscriptions(),
        );

        let event = event(
            "checkout.session.completed",
            json!({"id": "cs_2", "mode": "payment", "payment_status": "unpaid", "customer": "cus_1"}),
        );

        let outcome = dispatcher.handle(&event).await.unwrap();

        assert_eq!(outcome, EventOutcome::Ignored);
        assert!(orders.orders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn subscription_mode_checkout_routes_to_sync() {
        let subs = MockSubscriptionStore::new();
        let payment = MockPaymentProvider::without_subscriptions();
        let dispatcher = handler(MockOrderStore::new(), subs.clone(), payment.clone());

        let event = event(
            "checkout.session.completed",
            json!({"id": "cs_3", "mode": "subscription", "payment_status": "paid", "customer": "cus_9"}),
        );

        let outcome = dispatcher.handle(&event).await.unwrap();

        assert_eq!(
            outcome,
            EventOutcome::SubscriptionSynced {
                customer_id: "cus_9".to_string()
            }
        );
        assert_eq!(payment.lookups.load(Ordering::SeqCst), 1);
        let rows = subs.rows.lock().unwrap();
        assert_eq!(rows["cus_9"].status, SubscriptionStatus::NotStarted);
    }

    #[tokio::test]
    async fn subscription_lifecycle_event_syncs_its_customer_only() {
        let subs = MockSubscriptionStore::new();
        let dispatcher = handler(
            MockOrderStore::new(),
            subs.clone(),
            MockPaymentProvider::without_subscriptions(),
        );

        let event = event(
            "customer.subscription.updated",
            json!({"id": "sub_1", "customer": "cus_a", "status": "active"}),
        );

        dispatcher.handle(&event).await.unwrap();

        let rows = subs.rows.lock().unwrap();
        assert!(rows.contains_key("cus_a"));
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn invoice_payment_succeeded_routes_to_sync() {
        let subs = MockSubscriptionStore::new();
        let dispatcher = handler(
            MockOrderStore::new(),
            subs.clone(),
            MockPaymentProvider::without_subscriptions(),
        );

        let event = event(
            "invoice.payment_succeeded",
            json!({"id": "in_1", "customer": "cus_b"}),
        );

        let outcome = dispatcher.handle(&event).await.unwrap();

        assert_eq!(
            outcome,
            EventOutcome::SubscriptionSynced {
                customer_id: "cus_b".to_string()
            }
        );
    }

    #[tokio::test]
    async fn unrelated_event_types_are_ignored() {
        let orders = MockOrderStore::new();
        let subs = MockSubscriptionStore::new();
        let payment = MockPaymentProvider::without_subscriptions();
        let dispatcher = handler(orders.clone(), subs.clone(), payment.clone());

        let event = event("payment_intent.succeeded", json!({"id": "pi_1"}));

        let outcome = dispatcher.handle(&event).await.unwrap();

        assert_eq!(outcome, EventOutcome::Ignored);
        assert!(orders.orders.lock().unwrap().is_empty());
        assert!(subs.rows.lock().unwrap().is_empty());
        assert_eq!(payment.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn subscription_event_without_customer_is_ignored() {
        let subs = MockSubscriptionStore::new();
        let dispatcher = handler(
            MockOrderStore::new(),
            subs.clone(),
            MockPaymentProvider::without_subscriptions(),
        );

        let event = event("customer.subscription.deleted", json!({"id": "sub_1"}));

        let outcome = dispatcher.handle(&event).await.unwrap();

        assert_eq!(outcome, EventOutcome::Ignored);
        assert!(subs.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_checkout_object_is_an_error() {
        let dispatcher = handler(
            MockOrderStore::new(),
            MockSubscriptionStore::new(),
            MockPaymentProvider::without_subscriptions(),
        );

        // Missing required session fields
        let event = event("checkout.session.completed", json!({"id": "cs_broken"}));

        let result = dispatcher.handle(&event).await;

        assert!(matches!(result, Err(ProcessEventError::MalformedObject(_))));
    }
}
