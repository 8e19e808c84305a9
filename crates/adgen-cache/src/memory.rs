//! In-process cache store for development and tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CacheResult;
use crate::store::{prefix_of, CacheStore};

/// Map size at which inserting a new key first drops expired entries.
const SWEEP_THRESHOLD: usize = 256;

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

/// HashMap-backed store. Expired entries are dropped on read and swept on insert.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCache {
    entries: Arc<RwLock<HashMap<String, MemoryEntry>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.value.clone()))
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired: drop it so the map does not grow unbounded.
        let mut entries = self.entries.write().await;
        if matches!(entries.get(key), Some(e) if e.expires_at <= Instant::now()) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let now = Instant::now();
        let entry = MemoryEntry {
            value: value.to_string(),
            expires_at: now + ttl,
        };
        let mut entries = self.entries.write().await;
        if entries.len() >= SWEEP_THRESHOLD && !entries.contains_key(key) {
            entries.retain(|_, e| e.expires_at > now);
        }
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self, pattern: &str) -> CacheResult<u64> {
        let prefix = prefix_of(pattern);
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        let mut expired = 0u64;
        entries.retain(|key, entry| {
            if !key.starts_with(prefix) {
                return true;
            }
            if entry.expires_at <= now {
                expired += 1;
            }
            false
        });
        Ok((before - entries.len()) as u64 - expired)
    }

    async fn ping(&self) -> CacheResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = InMemoryCache::new();
        assert_eq!(cache.get("k").await.unwrap(), None);

        cache.set("k", "v1", Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v1"));

        // Last write wins
        cache.set("k", "v2", Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v2"));

        cache.delete("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = InMemoryCache::new();
        cache.set("k", "v", Duration::from_millis(20)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_clear_by_prefix() {
        let cache = InMemoryCache::new();
        let ttl = Duration::from_secs(60);
        cache.set("prompt_parse:v1:a", "1", ttl).await.unwrap();
        cache.set("prompt_parse:v1:b", "2", ttl).await.unwrap();
        cache.set("other:v1:c", "3", ttl).await.unwrap();

        assert_eq!(cache.clear("prompt_parse:v1:*").await.unwrap(), 2);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("other:v1:c").await.unwrap().as_deref(), Some("3"));
        assert_eq!(cache.clear("prompt_parse:").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_sweeps_expired_entries() {
        let cache = InMemoryCache::new();
        cache.set("long", "v", Duration::from_secs(60)).await.unwrap();
        for i in 1..SWEEP_THRESHOLD {
            cache
                .set(&format!("short:{}", i), "v", Duration::from_millis(10))
                .await
                .unwrap();
        }
        assert_eq!(cache.entries.read().await.len(), SWEEP_THRESHOLD);
        tokio::time::sleep(Duration::from_millis(30)).await;

        cache.set("fresh", "v", Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.entries.read().await.len(), 2);
        assert_eq!(cache.get("long").await.unwrap().as_deref(), Some("v"));
    }
}
