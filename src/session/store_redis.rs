use crate::session::{CachedSession, SessionCache};
use anyhow::Result;
use redis::AsyncCommands;

#[derive(Clone)]
pub struct SessionCacheRedis {
    pub client: redis::Client,
    pub ttl_seconds: u64,
}

impl SessionCacheRedis {
    pub fn new(redis_url: &str, ttl_seconds: u64) -> Result<Self> {
        Ok(Self {
            client: redis::Client::open(redis_url)?,
            ttl_seconds,
        })
    }

    pub fn session_key(reference: &str) -> String {
        format!("checkout:session:{}", reference)
    }

    /// Write side for the checkout-initiation flow, which mints the reference
    /// and opens the gateway session before redirecting. Reconciliation only
    /// ever reads and deletes.
    pub async fn put(&self, reference: &str, session: &CachedSession) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload = serde_json::to_string(session)?;
        let _: () = conn.set_ex(Self::session_key(reference), payload, self.ttl_seconds).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SessionCache for SessionCacheRedis {
    async fn get(&self, reference: &str) -> Result<Option<CachedSession>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(Self::session_key(reference)).await?;

        match payload {
            Some(p) => Ok(serde_json::from_str(&p).ok()),
            None => Ok(None),
        }
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: i64 = conn.del(Self::session_key(reference)).await?;
        Ok(())
    }
}
