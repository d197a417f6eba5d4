//! PostgreSQL implementation of the subscription mirror store.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::subscription::SubscriptionMirror;
use crate::ports::{SubscriptionStore, SubscriptionStoreError};

/// sqlx-backed mirror store, one row per customer, last write wins.
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn upsert(&self, mirror: &SubscriptionMirror) -> Result<(), SubscriptionStoreError> {
        sqlx::query(
            r#"
            INSERT INTO subscription_mirrors (
                customer_id, subscription_id, price_id,
                current_period_start, current_period_end, cancel_at_period_end,
                payment_method_brand, payment_method_last4, status, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (customer_id) DO UPDATE SET
                subscription_id = EXCLUDED.subscription_id,
                price_id = EXCLUDED.price_id,
                current_period_start = EXCLUDED.current_period_start,
                current_period_end = EXCLUDED.current_period_end,
                cancel_at_period_end = EXCLUDED.cancel_at_period_end,
                payment_method_brand = EXCLUDED.payment_method_brand,
                payment_method_last4 = EXCLUDED.payment_method_last4,
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&mirror.customer_id)
        .bind(&mirror.subscription_id)
        .bind(&mirror.price_id)
        .bind(mirror.current_period_start)
        .bind(mirror.current_period_end)
        .bind(mirror.cancel_at_period_end)
        .bind(&mirror.payment_method_brand)
        .bind(&mirror.payment_method_last4)
        .bind(mirror.status.as_str())
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            SubscriptionStoreError::Database(format!("Failed to upsert subscription mirror: {e}"))
        })?;

        Ok(())
    }
}
