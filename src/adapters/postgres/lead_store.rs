//! PostgreSQL implementation of the lead store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::lead::{Lead, NewLead};
use crate::ports::{LeadStore, LeadStoreError};

/// sqlx-backed lead store with a uniqueness constraint on email.
pub struct PostgresLeadStore {
    pool: PgPool,
}

impl PostgresLeadStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LeadRow {
    id: i64,
    name: String,
    email: String,
    phone: String,
    source: String,
    created_at: DateTime<Utc>,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        Lead {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            source: row.source,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl LeadStore for PostgresLeadStore {
    async fn insert(&self, lead: &NewLead) -> Result<Lead, LeadStoreError> {
        let row: LeadRow = sqlx::query_as(
            r#"
            INSERT INTO leads (name, email, phone, source, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, source, created_at
            "#,
        )
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.source)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                let unique_violation = db_err.code().as_deref() == Some("23505");
                if unique_violation || db_err.constraint() == Some("leads_email_key") {
                    return LeadStoreError::DuplicateEmail;
                }
            }
            LeadStoreError::Database(format!("Failed to insert lead: {e}"))
        })?;

        Ok(row.into())
    }
}
