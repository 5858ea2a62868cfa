use crate::domain::payment_request::{PaymentRequest, PaymentRequestStatus, Settlement};
use sqlx::{PgPool, Row};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("payment request {0} not found")]
    NotFound(i64),
    #[error("payment request {0} is {1}; settlement rejected")]
    Conflict(i64, String),
    #[error("payment request store unavailable: {0}")]
    Unavailable(String),
}

/// Source of truth for payment requests. `mark_paid` is idempotent keyed on
/// the request id: committing an already-paid request is a successful no-op.
/// The guard lives in the store's write path, not in caller pre-checks, so
/// concurrent attempts serialize here.
#[async_trait::async_trait]
pub trait PaymentRequestStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Option<PaymentRequest>, StoreError>;

    async fn mark_paid(&self, id: i64, settlement: Settlement) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PaymentRequestsRepo {
    pub pool: PgPool,
}

fn unavailable(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[async_trait::async_trait]
impl PaymentRequestStore for PaymentRequestsRepo {
    async fn get_by_id(&self, id: i64) -> Result<Option<PaymentRequest>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, amount, currency, status, customer_ref, notes, due_date,
                   gateway_session_id, transaction_code, payment_method, settled_at
            FROM payment_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(row.map(|r| {
            let status: String = r.get("status");
            PaymentRequest {
                id: r.get("id"),
                amount: r.get("amount"),
                currency: r.get("currency"),
                status: PaymentRequestStatus::from_db(&status),
                customer_ref: r.get("customer_ref"),
                notes: r.get("notes"),
                due_date: r.get("due_date"),
                gateway_session_id: r.get("gateway_session_id"),
                transaction_code: r.get("transaction_code"),
                payment_method: r.get("payment_method"),
                settled_at: r.get("settled_at"),
            }
        }))
    }

    async fn mark_paid(&self, id: i64, settlement: Settlement) -> Result<(), StoreError> {
        let updated = sqlx::query(
            r#"
            UPDATE payment_requests
            SET status = 'PAID',
                gateway_session_id = $2,
                transaction_code = $3,
                payment_method = $4,
                settled_at = now()
            WHERE id = $1 AND status IN ('PENDING', 'SENT')
            "#,
        )
        .bind(id)
        .bind(&settlement.gateway_session_id)
        .bind(&settlement.transaction_code)
        .bind(&settlement.payment_type)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?
        .rows_affected();

        if updated == 1 {
            return Ok(());
        }

        // Zero rows: either a concurrent commit got there first (no-op) or the
        // record is in a state that must never be settled.
        let row = sqlx::query("SELECT status FROM payment_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;

        match row {
            None => Err(StoreError::NotFound(id)),
            Some(r) => {
                let status: String = r.get("status");
                if status == "PAID" {
                    Ok(())
                } else {
                    Err(StoreError::Conflict(id, status))
                }
            }
        }
    }
}
