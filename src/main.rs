use axum::routing::get;
use axum::Router;
use checkout_reconciler::config::AppConfig;
use checkout_reconciler::gateways::sumup::SumupGateway;
use checkout_reconciler::repo::payment_requests_repo::PaymentRequestsRepo;
use checkout_reconciler::service::reconciliation_service::ReconciliationService;
use checkout_reconciler::session::store_redis::SessionCacheRedis;
use checkout_reconciler::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let session_cache = SessionCacheRedis::new(&cfg.redis_url, 24 * 60 * 60)?;
    let gateway = SumupGateway {
        base_url: cfg.gateway_base_url.clone(),
        api_key: cfg.gateway_api_key.clone(),
        timeout_ms: cfg.gateway_timeout_ms,
        client: reqwest::Client::new(),
    };

    let reconciliation = ReconciliationService {
        store: Arc::new(PaymentRequestsRepo { pool }),
        gateway: Arc::new(gateway),
        session_cache: Arc::new(session_cache),
        store_timeout: Duration::from_millis(cfg.store_timeout_ms),
    };

    let state = AppState { reconciliation };

    let app = Router::new()
        .route(
            "/checkout/return",
            get(checkout_reconciler::http::handlers::reconcile::checkout_return),
        )
        .route("/health", get(checkout_reconciler::http::handlers::reconcile::health))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
