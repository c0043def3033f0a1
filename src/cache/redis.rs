use super::Cache;
use crate::error::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Redis-backed cache used in production. The connection manager
/// reconnects on its own; per-command failures degrade to cache misses.
pub struct RedisCache {
    manager: ConnectionManager,
    ttl: Duration,
}

impl RedisCache {
    /// Connect and verify the server with a `PING`. TTL applies to every
    /// subsequent `set`.
    pub async fn connect(
        host: &str,
        port: u16,
        password: &str,
        db: i64,
        ttl: Duration,
    ) -> Result<Self> {
        let url = if password.is_empty() {
            format!("redis://{host}:{port}/{db}")
        } else {
            format!("redis://:{password}@{host}:{port}/{db}")
        };

        let client = redis::Client::open(url)?;
        let mut manager = ConnectionManager::new(client).await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut manager)
            .await?;

        debug!(host, port, db, "connected to redis");
        Ok(Self { manager, ttl })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let mut conn = self.manager.clone();
        let raw: Option<String> = match conn.get(key).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key, error = %err, "redis get failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw?) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "cached payload is not valid JSON, treating as miss");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: Value) {
        let mut conn = self.manager.clone();
        if let Err(err) = conn
            .set_ex::<_, _, ()>(key, value.to_string(), self.ttl.as_secs())
            .await
        {
            warn!(key, error = %err, "redis set failed, dropping cache write");
        }
    }

    async fn delete(&self, key: &str) {
        let mut conn = self.manager.clone();
        if let Err(err) = conn.del::<_, ()>(key).await {
            warn!(key, error = %err, "redis del failed");
        }
    }

    async fn flush(&self) {
        let mut conn = self.manager.clone();
        if let Err(err) = redis::cmd("FLUSHDB").query_async::<_, ()>(&mut conn).await {
            warn!(error = %err, "redis flushdb failed");
        }
    }

    async fn item_count(&self) -> usize {
        let mut conn = self.manager.clone();
        match redis::cmd("DBSIZE").query_async::<_, i64>(&mut conn).await {
            Ok(size) => size.max(0) as usize,
            Err(err) => {
                warn!(error = %err, "redis dbsize failed");
                0
            }
        }
    }

    async fn close(&self) {
        // The connection manager has no explicit shutdown; dropping the
        // last clone closes the multiplexed connection.
    }
}
