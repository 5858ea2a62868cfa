use serde::{Deserialize, Serialize};

pub mod mock;
pub mod sumup;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutTransaction {
    pub transaction_code: Option<String>,
    pub id: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub payment_type: Option<String>,
}

/// Gateway-owned view of one checkout attempt. Read-only from our side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutStatus {
    pub status: String,
    #[serde(default)]
    pub transactions: Vec<CheckoutTransaction>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway request timed out")]
    Timeout,
    #[error("gateway unreachable: {0}")]
    Network(String),
    #[error("gateway response could not be parsed: {0}")]
    Parse(String),
    #[error("gateway returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusBucket {
    Paid,
    Pending,
    Other(String),
}

/// Case-insensitive normalization of the gateway's status vocabulary.
/// Anything that is not PAID or PENDING (failed, expired, unrecognized) lands
/// in `Other` and carries the raw status for diagnosis.
pub fn normalize_status(raw: &str) -> StatusBucket {
    let upper = raw.trim().to_uppercase();
    match upper.as_str() {
        "PAID" => StatusBucket::Paid,
        "PENDING" => StatusBucket::Pending,
        _ => StatusBucket::Other(upper),
    }
}

#[async_trait::async_trait]
pub trait CheckoutGateway: Send + Sync {
    fn name(&self) -> &'static str;

    async fn get_checkout_status(&self, session_id: &str) -> Result<CheckoutStatus, GatewayError>;
}
