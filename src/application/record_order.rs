//! Order recorder for paid one-time checkouts.

use std::sync::Arc;

use crate::domain::order::{NewOrder, OrderStatus};
use crate::domain::webhook::CheckoutSessionObject;
use crate::ports::{OrderInsert, OrderStore, OrderStoreError};

/// What happened to a completed-session payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOrderResult {
    /// A new order row was written for the session.
    Recorded { session_id: String },
    /// The session was already on file; the replay was ignored.
    DuplicateIgnored { session_id: String },
    /// The session carried no customer id; nothing was written.
    SkippedNoCustomer { session_id: String },
}

/// Maps a completed checkout session onto an append-only order row.
pub struct RecordOrderHandler {
    orders: Arc<dyn OrderStore>,
}

impl RecordOrderHandler {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    /// Record the order for a paid, payment-mode session.
    ///
    /// Callers are responsible for the mode/payment-status gate; this handler
    /// only requires a customer id and maps the fields across.
    pub async fn handle(
        &self,
        session: &CheckoutSessionObject,
    ) -> Result<RecordOrderResult, OrderStoreError> {
        let Some(customer_id) = session.customer.clone() else {
            tracing::warn!(
                session_id = %session.id,
                "No customer ID found in checkout session; order not recorded"
            );
            return Ok(RecordOrderResult::SkippedNoCustomer {
                session_id: session.id.clone(),
            });
        };

        let order = NewOrder {
            checkout_session_id: session.id.clone(),
            payment_intent_id: session.payment_intent.clone(),
            customer_id,
            amount_subtotal: session.amount_subtotal.unwrap_or(0),
            amount_total: session.amount_total.unwrap_or(0),
            currency: session.currency.clone().unwrap_or_else(|| "usd".to_string()),
            payment_status: session.payment_status.clone(),
            status: OrderStatus::Completed,
        };

        match self.orders.insert(&order).await? {
            OrderInsert::Inserted => {
                tracing::info!(
                    session_id = %order.checkout_session_id,
                    customer_id = %order.customer_id,
                    amount_total = order.amount_total,
                    "Recorded one-time payment order"
                );
                Ok(RecordOrderResult::Recorded {
                    session_id: order.checkout_session_id,
                })
            }
            OrderInsert::AlreadyRecorded => {
                tracing::warn!(
                    session_id = %order.checkout_session_id,
                    "Duplicate delivery for already-recorded checkout session; ignored"
                );
                Ok(RecordOrderResult::DuplicateIgnored {
                    session_id: order.checkout_session_id,
                })
            }
        }
    }
}
