//! In-memory cache with tag-based invalidation.
//!
//! Entries live in a HashMap behind an async RwLock; a tag index maps each
//! resource tag to the keys registered under it. Expiry is lazy, on read.
//! Note: data is lost on process restart.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use snapfeed_core::ports::{Cache, CacheError};

struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    tags: HashMap<String, HashSet<String>>,
}

/// In-memory cache using a HashMap plus a tag index, behind an async RwLock.
pub struct InMemoryCache {
    state: RwLock<CacheState>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
        }
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        entry
            .expires_at
            .map(|exp| Instant::now() > exp)
            .unwrap_or(false)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let state = self.state.read().await;
        let entry = state.entries.get(key)?;

        if Self::is_expired(entry) {
            drop(state);
            // Clean up the expired entry with a write lock.
            let mut state = self.state.write().await;
            state.entries.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        tags: &[&str],
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let mut state = self.state.write().await;

        let expires_at = ttl.map(|d| Instant::now() + d);
        state.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at,
            },
        );

        for tag in tags {
            state
                .tags
                .entry((*tag).to_string())
                .or_default()
                .insert(key.to_string());
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut state = self.state.write().await;
        state.entries.remove(key);
        Ok(())
    }

    async fn invalidate_tag(&self, tag: &str) -> Result<(), CacheError> {
        let mut state = self.state.write().await;
        if let Some(keys) = state.tags.remove(tag) {
            for key in keys {
                state.entries.remove(&key);
            }
        }
        Ok(())
    }

    async fn exists(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new();
        cache.set("key1", "value1", &[], None).await.unwrap();
        assert_eq!(cache.get("key1").await, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = InMemoryCache::new();
        cache.set("key1", "value1", &[], None).await.unwrap();
        cache.delete("key1").await.unwrap();
        assert_eq!(cache.get("key1").await, None);
    }

    #[tokio::test]
    async fn invalidate_tag_drops_only_tagged_keys() {
        let cache = InMemoryCache::new();
        cache
            .set("posts:recent", "[]", &["posts"], None)
            .await
            .unwrap();
        cache
            .set("user:current", "{}", &["session"], None)
            .await
            .unwrap();

        cache.invalidate_tag("posts").await.unwrap();

        assert_eq!(cache.get("posts:recent").await, None);
        assert_eq!(cache.get("user:current").await, Some("{}".to_string()));
    }

    #[tokio::test]
    async fn expired_entries_vanish_on_read() {
        let cache = InMemoryCache::new();
        cache
            .set("key1", "value1", &[], Some(Duration::from_millis(5)))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(cache.get("key1").await, None);
    }
}
