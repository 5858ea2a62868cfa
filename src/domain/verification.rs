use serde::{Deserialize, Serialize};

/// Parameters carried by the redirect back from the gateway's checkout page.
/// `amount`, `currency` and `status` are advisory display values; the commit
/// decision never reads them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedirectParams {
    pub payment_request_id: Option<i64>,
    pub checkout_reference: Option<String>,
    pub checkout_id: Option<String>,
    pub transaction_id: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationState {
    Pending,
    Confirmed,
    AlreadyPaid,
    Waiting,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    pub state: VerificationState,
    pub message: String,
    pub resolved_amount: Option<String>,
    pub resolved_currency: Option<String>,
    pub resolved_transaction_id: Option<String>,
}

pub const MSG_CONFIRMED: &str = "payment confirmed; thank you";
pub const MSG_ALREADY_PAID: &str =
    "this payment was already confirmed earlier; no additional charge was made";
pub const MSG_STILL_PROCESSING: &str = "payment is still processing; refresh shortly";

/// Closed taxonomy of reconciliation failures. One canonical message per kind;
/// the two reference-resolution kinds surface as `Waiting`, everything else as
/// `Error`.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileFailure {
    #[error("missing payment reference; contact support if you were charged")]
    MissingReference,
    #[error("payment initiated, awaiting gateway confirmation")]
    SessionUnresolved,
    #[error("{detail}; {}", retry_guidance(.timed_out))]
    GatewayUnavailable { timed_out: bool, detail: String },
    #[error("gateway reported status {0}; restart checkout if you were not charged")]
    GatewayRejected(String),
    #[error("payment record is in a conflicting state; contact support")]
    StoreConflict,
    #[error("payment records are temporarily unavailable ({0}); retry in a moment")]
    StoreUnavailable(String),
}

fn retry_guidance(timed_out: &bool) -> &'static str {
    if *timed_out {
        "the gateway did not answer in time, retry in a moment"
    } else {
        "retry in a moment"
    }
}

impl ReconcileFailure {
    pub fn state(&self) -> VerificationState {
        match self {
            ReconcileFailure::MissingReference | ReconcileFailure::SessionUnresolved => {
                VerificationState::Waiting
            }
            _ => VerificationState::Error,
        }
    }
}
