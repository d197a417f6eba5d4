//! PostgreSQL implementation of the order store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::order::NewOrder;
use crate::ports::{OrderInsert, OrderStore, OrderStoreError};

/// sqlx-backed order store.
///
/// Duplicate deliveries are absorbed by the unique constraint on
/// `checkout_session_id`: the insert is `ON CONFLICT DO NOTHING` and a
/// zero-row result is reported as an already-recorded session.
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert(&self, order: &NewOrder) -> Result<OrderInsert, OrderStoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO orders (
                id, checkout_session_id, payment_intent_id, customer_id,
                amount_subtotal, amount_total, currency, payment_status, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (checkout_session_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&order.checkout_session_id)
        .bind(&order.payment_intent_id)
        .bind(&order.customer_id)
        .bind(order.amount_subtotal)
        .bind(order.amount_total)
        .bind(&order.currency)
        .bind(&order.payment_status)
        .bind(order.status.as_str())
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| OrderStoreError::Database(format!("Failed to insert order: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(OrderInsert::AlreadyRecorded);
        }
        Ok(OrderInsert::Inserted)
    }
}
