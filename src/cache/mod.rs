//! Response cache capability.
//!
//! The validator only depends on the [`Cache`] trait; production wires in
//! [`RedisCache`], tests and development use [`InMemoryCache`]. Values are
//! opaque JSON — callers re-type them on read and treat a decode failure
//! as a miss. Transport errors are logged and swallowed, never surfaced.

mod memory;
mod redis;

pub use memory::InMemoryCache;
pub use self::redis::RedisCache;

use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait Cache: Send + Sync {
    /// Fetch a value. `None` covers absence, expiry, transport errors and
    /// undecodable payloads alike.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Store a value under the cache's global TTL. Failures are silent.
    async fn set(&self, key: &str, value: Value);

    async fn delete(&self, key: &str);

    async fn flush(&self);

    async fn item_count(&self) -> usize;

    /// Release the underlying transport. Called once at shutdown.
    async fn close(&self);
}
