use serde::{Deserialize, Serialize};

pub mod store_redis;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSession {
    pub session_id: String,
    #[serde(default)]
    pub opened_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Advisory mapping from checkout reference to the gateway session opened for
/// it. The entry is owned by whichever client initiated checkout and may be
/// absent (other device, expired, cleared); absence is a normal waiting path,
/// never a correctness failure.
#[async_trait::async_trait]
pub trait SessionCache: Send + Sync {
    async fn get(&self, reference: &str) -> anyhow::Result<Option<CachedSession>>;

    async fn delete(&self, reference: &str) -> anyhow::Result<()>;
}
