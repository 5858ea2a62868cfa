use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentRequestStatus {
    Pending,
    Sent,
    Paid,
    Cancelled,
}

impl PaymentRequestStatus {
    pub fn as_db(&self) -> &'static str {
        match self {
            PaymentRequestStatus::Pending => "PENDING",
            PaymentRequestStatus::Sent => "SENT",
            PaymentRequestStatus::Paid => "PAID",
            PaymentRequestStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn from_db(s: &str) -> Self {
        match s {
            "SENT" => PaymentRequestStatus::Sent,
            "PAID" => PaymentRequestStatus::Paid,
            "CANCELLED" => PaymentRequestStatus::Cancelled,
            _ => PaymentRequestStatus::Pending,
        }
    }
}

/// Source-of-truth record for money owed. `Paid` is terminal: the settlement
/// columns are written exactly once by the guarded update in the repo.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    pub id: i64,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentRequestStatus,
    pub customer_ref: String,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub gateway_session_id: Option<String>,
    pub transaction_code: Option<String>,
    pub payment_method: Option<String>,
    pub settled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Settlement {
    pub gateway_session_id: String,
    pub transaction_code: String,
    pub payment_type: Option<String>,
}
