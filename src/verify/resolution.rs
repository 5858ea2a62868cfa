use crate::gateways::CheckoutTransaction;
use crate::session::CachedSession;

/// Locates the gateway session id: an explicitly supplied checkout id wins,
/// otherwise the cached session opened for this reference. Returns `None` when
/// neither is usable; the caller treats that as a normal waiting path.
pub fn resolve_session_id(
    checkout_id: Option<&str>,
    cached: Option<&CachedSession>,
) -> Option<String> {
    if let Some(id) = checkout_id {
        if !id.trim().is_empty() {
            return Some(id.trim().to_string());
        }
    }

    cached
        .map(|c| c.session_id.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Transaction code fallback chain: the settled transaction's own code, its
/// id, the redirect's transaction id, else a synthesized code. Never empty.
pub fn transaction_code(
    tx: Option<&CheckoutTransaction>,
    fallback_transaction_id: Option<&str>,
) -> String {
    if let Some(tx) = tx {
        if let Some(code) = non_empty(tx.transaction_code.as_deref()) {
            return code;
        }
        if let Some(id) = non_empty(tx.id.as_deref()) {
            return id;
        }
    }
    if let Some(id) = non_empty(fallback_transaction_id) {
        return id;
    }

    format!("recon_{}", uuid::Uuid::new_v4())
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}
