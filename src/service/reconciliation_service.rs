use crate::domain::payment_request::{PaymentRequest, PaymentRequestStatus, Settlement};
use crate::domain::verification::{
    ReconcileFailure, RedirectParams, VerificationResult, VerificationState, MSG_ALREADY_PAID,
    MSG_CONFIRMED, MSG_STILL_PROCESSING,
};
use crate::gateways::{
    normalize_status, CheckoutGateway, CheckoutStatus, CheckoutTransaction, GatewayError,
    StatusBucket,
};
use crate::repo::payment_requests_repo::{PaymentRequestStore, StoreError};
use crate::session::SessionCache;
use crate::verify::amount::{display_amount, format_major};
use crate::verify::resolution::{resolve_session_id, transaction_code};
use std::sync::Arc;
use std::time::Duration;

/// One reconciliation attempt per call: read the internal record, resolve the
/// gateway session, query the gateway, commit settlement through the store's
/// idempotent write. Holds no locks; the store is the single point of
/// serialization across concurrent attempts.
#[derive(Clone)]
pub struct ReconciliationService {
    pub store: Arc<dyn PaymentRequestStore>,
    pub gateway: Arc<dyn CheckoutGateway>,
    pub session_cache: Arc<dyn SessionCache>,
    pub store_timeout: Duration,
}

impl ReconciliationService {
    /// Never fails: every collaborator failure folds into a `VerificationResult`.
    pub async fn reconcile(&self, params: RedirectParams) -> VerificationResult {
        if let Some(claimed) = params.status.as_deref() {
            // Advisory only; logged for diagnosis, never trusted for the commit.
            tracing::debug!(claimed_status = claimed, "redirect carried a claimed status");
        }

        let result = match self.run(&params).await {
            Ok(result) => result,
            Err(failure) => fold_failure(failure, &params),
        };

        tracing::info!(
            payment_request_id = ?params.payment_request_id,
            checkout_reference = ?params.checkout_reference,
            state = ?result.state,
            "reconciliation attempt finished"
        );
        result
    }

    async fn run(&self, params: &RedirectParams) -> Result<VerificationResult, ReconcileFailure> {
        let id = params.payment_request_id.ok_or(ReconcileFailure::MissingReference)?;
        let reference = params
            .checkout_reference
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(ReconcileFailure::MissingReference)?;

        let request = self.read_request(id).await?.ok_or(ReconcileFailure::StoreConflict)?;
        if request.status == PaymentRequestStatus::Paid {
            // Idempotency short-circuit: the internal record already shows
            // settlement, so the gateway is never re-queried and the store
            // never re-written.
            return Ok(already_paid_result(&request));
        }

        let checkout_id = params.checkout_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let cached = if checkout_id.is_some() {
            None
        } else {
            match self.session_cache.get(reference).await {
                Ok(cached) => cached,
                Err(e) => {
                    tracing::warn!(reference, error = %e, "session cache read failed");
                    None
                }
            }
        };
        let session_id = resolve_session_id(checkout_id, cached.as_ref())
            .ok_or(ReconcileFailure::SessionUnresolved)?;

        let checkout = self
            .gateway
            .get_checkout_status(&session_id)
            .await
            .map_err(|e| {
                let timed_out = matches!(e, GatewayError::Timeout);
                let detail = e.to_string();
                ReconcileFailure::GatewayUnavailable {
                    timed_out,
                    detail: if detail.is_empty() {
                        "payment gateway unreachable".to_string()
                    } else {
                        detail
                    },
                }
            })?;

        match normalize_status(&checkout.status) {
            StatusBucket::Paid => {
                let tx = checkout.transactions.first();
                let code = transaction_code(tx, params.transaction_id.as_deref());
                let settlement = Settlement {
                    gateway_session_id: session_id.clone(),
                    transaction_code: code.clone(),
                    payment_type: tx.and_then(|t| t.payment_type.clone()),
                };

                self.commit(id, settlement).await?;

                if let Err(e) = self.session_cache.delete(reference).await {
                    tracing::warn!(reference, error = %e, "session cache cleanup failed");
                }

                let (amount, currency) = advisory_display(tx, Some(&checkout), params);
                Ok(VerificationResult {
                    state: VerificationState::Confirmed,
                    message: MSG_CONFIRMED.to_string(),
                    resolved_amount: Some(amount.unwrap_or_else(|| "0.00".to_string())),
                    resolved_currency: Some(currency),
                    resolved_transaction_id: Some(code),
                })
            }
            StatusBucket::Pending => {
                let (amount, currency) = advisory_display(None, Some(&checkout), params);
                Ok(VerificationResult {
                    state: VerificationState::Waiting,
                    message: MSG_STILL_PROCESSING.to_string(),
                    resolved_amount: amount,
                    resolved_currency: Some(currency),
                    resolved_transaction_id: params.transaction_id.clone(),
                })
            }
            StatusBucket::Other(raw) => Err(ReconcileFailure::GatewayRejected(raw)),
        }
    }

    async fn read_request(&self, id: i64) -> Result<Option<PaymentRequest>, ReconcileFailure> {
        match tokio::time::timeout(self.store_timeout, self.store.get_by_id(id)).await {
            Err(_) => Err(ReconcileFailure::StoreUnavailable("store read timed out".to_string())),
            Ok(Err(StoreError::Unavailable(detail))) => {
                Err(ReconcileFailure::StoreUnavailable(detail))
            }
            Ok(Err(_)) => Err(ReconcileFailure::StoreConflict),
            Ok(Ok(request)) => Ok(request),
        }
    }

    async fn commit(&self, id: i64, settlement: Settlement) -> Result<(), ReconcileFailure> {
        let store = Arc::clone(&self.store);

        // The write runs on its own task so tearing down the caller cannot
        // drop it mid-flight; the task logs its outcome whether or not anyone
        // is still awaiting the attempt.
        let task = tokio::spawn(async move {
            let outcome = store.mark_paid(id, settlement).await;
            match &outcome {
                Ok(()) => tracing::info!(payment_request_id = id, "settlement committed"),
                Err(e) => {
                    tracing::warn!(payment_request_id = id, error = %e, "settlement commit failed")
                }
            }
            outcome
        });

        match tokio::time::timeout(self.store_timeout, task).await {
            Err(_) => Err(ReconcileFailure::StoreUnavailable(
                "settlement commit timed out".to_string(),
            )),
            Ok(Err(join)) => Err(ReconcileFailure::StoreUnavailable(join.to_string())),
            Ok(Ok(Ok(()))) => Ok(()),
            Ok(Ok(Err(StoreError::Unavailable(detail)))) => {
                Err(ReconcileFailure::StoreUnavailable(detail))
            }
            Ok(Ok(Err(_))) => Err(ReconcileFailure::StoreConflict),
        }
    }
}

fn already_paid_result(request: &PaymentRequest) -> VerificationResult {
    VerificationResult {
        state: VerificationState::AlreadyPaid,
        message: MSG_ALREADY_PAID.to_string(),
        resolved_amount: Some(format!("{:.2}", request.amount)),
        resolved_currency: Some(request.currency.clone()),
        resolved_transaction_id: request.transaction_code.clone(),
    }
}

/// Display values only: transaction first, then the session, then whatever the
/// redirect carried. The commit decision never reads these.
fn advisory_display(
    tx: Option<&CheckoutTransaction>,
    checkout: Option<&CheckoutStatus>,
    params: &RedirectParams,
) -> (Option<String>, String) {
    let amount = tx
        .and_then(|t| t.amount)
        .map(format_major)
        .or_else(|| checkout.and_then(|c| c.amount).map(format_major))
        .or_else(|| params.amount.as_deref().and_then(display_amount));

    let currency = tx
        .and_then(|t| t.currency.clone())
        .or_else(|| checkout.and_then(|c| c.currency.clone()))
        .or_else(|| params.currency.clone().filter(|c| !c.trim().is_empty()))
        .unwrap_or_else(|| "EUR".to_string());

    (amount, currency)
}

fn fold_failure(failure: ReconcileFailure, params: &RedirectParams) -> VerificationResult {
    let (amount, currency) = advisory_display(None, None, params);
    VerificationResult {
        state: failure.state(),
        message: failure.to_string(),
        resolved_amount: amount,
        resolved_currency: Some(currency),
        resolved_transaction_id: params.transaction_id.clone(),
    }
}
