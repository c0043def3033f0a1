use super::Cache;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// In-memory cache for development and tests. Reads take a shared lock,
/// writes an exclusive one; expired entries are dropped lazily on access.
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Option<Duration>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: None,
        }
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        {
            let entries = self.entries.read().unwrap();
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: upgrade to a write lock and evict.
        self.entries.write().unwrap().remove(key);
        None
    }

    async fn set(&self, key: &str, value: Value) {
        let entry = Entry {
            value,
            expires_at: self.ttl.map(|ttl| Instant::now() + ttl),
        };
        self.entries.write().unwrap().insert(key.to_string(), entry);
    }

    async fn delete(&self, key: &str) {
        self.entries.write().unwrap().remove(key);
    }

    async fn flush(&self) {
        self.entries.write().unwrap().clear();
    }

    async fn item_count(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    async fn close(&self) {}
}
