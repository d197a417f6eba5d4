//! Subscription synchronizer.
//!
//! Pulls the provider's current view of a customer's subscription and
//! overwrites the local mirror row. The provider is the source of record;
//! the mirror is a read-mostly projection.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::subscription::SubscriptionMirror;
use crate::ports::{
    CustomerSubscription, PaymentError, PaymentProvider, SubscriptionStore,
    SubscriptionStoreError,
};

/// Error while synchronizing a customer's subscription state.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("provider lookup failed: {0}")]
    Provider(#[from] PaymentError),

    #[error("mirror upsert failed: {0}")]
    Store(#[from] SubscriptionStoreError),
}

/// Result of a sync pass for one customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncResult {
    /// The customer has a subscription; the mirror now reflects it.
    Synced { subscription_id: String },
    /// No subscription on the provider side; mirror set to `not_started`.
    MarkedNotStarted,
}

/// Synchronizes one customer's mirror row from provider state.
pub struct SyncSubscriptionHandler {
    payment: Arc<dyn PaymentProvider>,
    subscriptions: Arc<dyn SubscriptionStore>,
}

impl SyncSubscriptionHandler {
    pub fn new(
        payment: Arc<dyn PaymentProvider>,
        subscriptions: Arc<dyn SubscriptionStore>,
    ) -> Self {
        Self {
            payment,
            subscriptions,
        }
    }

    /// Fetch the latest subscription for the customer and upsert the mirror.
    ///
    /// A customer with zero subscriptions gets a `not_started` row, which
    /// overwrites any prior state; this is how cancellations that delete the
    /// last subscription are reconciled.
    pub async fn handle(&self, customer_id: &str) -> Result<SyncResult, SyncError> {
        let subscription = self.payment.latest_subscription(customer_id).await?;

        let Some(subscription) = subscription else {
            tracing::info!(customer_id, "No subscriptions found; marking not_started");
            self.subscriptions
                .upsert(&SubscriptionMirror::not_started(customer_id))
                .await?;
            return Ok(SyncResult::MarkedNotStarted);
        };

        let mirror = mirror_from(customer_id, &subscription);
        self.subscriptions.upsert(&mirror).await?;

        tracing::info!(
            customer_id,
            subscription_id = %subscription.id,
            status = mirror.status.as_str(),
            "Synced subscription mirror"
        );

        Ok(SyncResult::Synced {
            subscription_id: subscription.id,
        })
    }
}

fn mirror_from(customer_id: &str, sub: &CustomerSubscription) -> SubscriptionMirror {
    let (brand, last4) = match &sub.payment_method {
        Some(card) => (Some(card.brand.clone()), Some(card.last4.clone())),
        None => (None, None),
    };

    SubscriptionMirror {
        customer_id: customer_id.to_string(),
        subscription_id: Some(sub.id.clone()),
        price_id: sub.price_id.clone(),
        current_period_start: Some(sub.current_period_start),
        current_period_end: Some(sub.current_period_end),
        cancel_at_period_end: sub.cancel_at_period_end,
        payment_method_brand: brand,
        payment_method_last4: last4,
        status: sub.status,
    }
}
