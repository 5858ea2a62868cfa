use crate::domain::verification::RedirectParams;
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

pub async fn checkout_return(
    State(state): State<AppState>,
    Query(params): Query<RedirectParams>,
) -> impl IntoResponse {
    let result = state.reconciliation.reconcile(params).await;
    (axum::http::StatusCode::OK, Json(result)).into_response()
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}
