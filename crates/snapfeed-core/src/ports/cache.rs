use async_trait::async_trait;
use std::time::Duration;

/// Cache trait - string entries addressed by key, grouped by resource tag.
///
/// Tags are how the query layer invalidates: a mutation that changes a
/// resource calls [`Cache::invalidate_tag`] and every entry registered under
/// that tag is dropped, forcing the next read to re-fetch.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a value from the cache.
    async fn get(&self, key: &str) -> Option<String>;

    /// Set a value, registering it under the given tags, with optional TTL.
    async fn set(
        &self,
        key: &str,
        value: &str,
        tags: &[&str],
        ttl: Option<Duration>,
    ) -> Result<(), CacheError>;

    /// Delete a single key.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Drop every entry registered under a tag.
    async fn invalidate_tag(&self, tag: &str) -> Result<(), CacheError>;

    /// Check if a key exists.
    async fn exists(&self, key: &str) -> bool;
}

/// Cache operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("operation failed: {0}")]
    Operation(String),
}
