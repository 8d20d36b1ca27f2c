//! The data-mutation/query layer.
//!
//! [`QueryClient`] wraps the domain operations with the tag-invalidated
//! cache: reads serve from cache when present, mutations invalidate the
//! tags of the resources they change so the next read re-fetches. The cache
//! is best effort - a cache failure is logged and the operation's result is
//! returned regardless.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use snapfeed_core::domain::{Post, SavedPost, Session, User};
use snapfeed_core::error::DomainError;
use snapfeed_core::ports::Cache;

use crate::client::Client;
use crate::dto::{Credentials, NewPost, NewUser};

/// Cache keys for the query layer's reads.
pub mod keys {
    pub const RECENT_POSTS: &str = "posts:recent";
    pub const CURRENT_USER: &str = "user:current";
}

/// Resource tags linking mutations to the cached reads they invalidate.
pub mod tags {
    pub const POSTS: &str = "posts";
    pub const SESSION: &str = "session";
}

/// Cache-aware wrapper around [`Client`].
pub struct QueryClient {
    client: Client,
    cache: Arc<dyn Cache>,
}

impl QueryClient {
    pub fn new(client: Client, cache: Arc<dyn Cache>) -> Self {
        Self { client, cache }
    }

    /// The wrapped client, for operations that bypass the cache.
    pub fn client(&self) -> &Client {
        &self.client
    }

    // ---- queries ----

    /// The feed: cached under [`keys::RECENT_POSTS`], tag [`tags::POSTS`].
    pub async fn recent_posts(&self) -> Result<Vec<Post>, DomainError> {
        if let Some(posts) = self.cached(keys::RECENT_POSTS).await {
            return Ok(posts);
        }

        let posts = self.client.recent_posts().await?;
        self.store(keys::RECENT_POSTS, &posts, &[tags::POSTS]).await;
        Ok(posts)
    }

    /// The signed-in user: cached under [`keys::CURRENT_USER`], tag
    /// [`tags::SESSION`].
    pub async fn current_user(&self) -> Result<Option<User>, DomainError> {
        if let Some(user) = self.cached(keys::CURRENT_USER).await {
            return Ok(user);
        }

        let user = self.client.current_user().await?;
        self.store(keys::CURRENT_USER, &user, &[tags::SESSION]).await;
        Ok(user)
    }

    // ---- mutations ----

    pub async fn create_user_account(&self, new_user: NewUser) -> Result<User, DomainError> {
        let user = self.client.create_user_account(new_user).await?;
        self.invalidate(&[tags::SESSION]).await;
        Ok(user)
    }

    pub async fn sign_in(&self, credentials: Credentials) -> Result<Session, DomainError> {
        let session = self.client.sign_in(credentials).await?;
        // Feed visibility follows the session, so the feed re-fetches too.
        self.invalidate(&[tags::SESSION, tags::POSTS]).await;
        Ok(session)
    }

    pub async fn sign_out(&self) -> Result<(), DomainError> {
        self.client.sign_out().await?;
        self.invalidate(&[tags::SESSION, tags::POSTS]).await;
        Ok(())
    }

    pub async fn create_post(&self, new_post: NewPost) -> Result<Post, DomainError> {
        let post = self.client.create_post(new_post).await?;
        self.invalidate(&[tags::POSTS]).await;
        Ok(post)
    }

    pub async fn like_post(&self, post_id: &str, likes: Vec<String>) -> Result<Post, DomainError> {
        let post = self.client.like_post(post_id, likes).await?;
        self.invalidate(&[tags::POSTS]).await;
        Ok(post)
    }

    pub async fn save_post(&self, post_id: &str, user_id: &str) -> Result<SavedPost, DomainError> {
        let saved = self.client.save_post(post_id, user_id).await?;
        self.invalidate(&[tags::POSTS]).await;
        Ok(saved)
    }

    pub async fn delete_saved_post(&self, saved_post_id: &str) -> Result<(), DomainError> {
        self.client.delete_saved_post(saved_post_id).await?;
        self.invalidate(&[tags::POSTS]).await;
        Ok(())
    }

    // ---- cache plumbing ----

    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.cache.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "dropping undecodable cache entry");
                None
            }
        }
    }

    async fn store<T: Serialize>(&self, key: &str, value: &T, tags: &[&str]) {
        match serde_json::to_string(value) {
            Ok(raw) => {
                if let Err(e) = self.cache.set(key, &raw, tags, None).await {
                    tracing::warn!(key, error = %e, "failed to cache query result");
                }
            }
            Err(e) => tracing::warn!(key, error = %e, "failed to serialize query result"),
        }
    }

    async fn invalidate(&self, tags: &[&str]) {
        for tag in tags {
            if let Err(e) = self.cache.invalidate_tag(tag).await {
                tracing::warn!(tag, error = %e, "failed to invalidate cache tag");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use snapfeed_core::domain::FileUpload;
    use snapfeed_core::ports::{Collection, Documents};
    use snapfeed_infra::{InMemoryCache, MemoryBackend};

    use super::*;

    fn query_client(backend: Arc<MemoryBackend>) -> QueryClient {
        QueryClient::new(
            Client::from_backend(backend),
            Arc::new(InMemoryCache::new()),
        )
    }

    fn new_post(caption: &str) -> NewPost {
        NewPost {
            creator_id: "user-1".to_string(),
            caption: caption.to_string(),
            image: FileUpload {
                name: "photo.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: vec![1, 2, 3],
            },
            location: String::new(),
            tags: None,
        }
    }

    #[tokio::test]
    async fn feed_reads_serve_from_cache_until_invalidated() {
        let backend = Arc::new(MemoryBackend::new());
        let queries = query_client(backend.clone());

        queries.create_post(new_post("one")).await.unwrap();
        assert_eq!(queries.recent_posts().await.unwrap().len(), 1);

        // A write that bypasses the query layer is invisible to the cached
        // read...
        let stray = serde_json::json!({
            "creator": "user-9",
            "caption": "stray",
            "imageUrl": "memory://stray",
            "imageId": "stray-file",
            "location": "",
            "tags": [],
            "likes": [],
        });
        backend
            .create(
                Collection::Posts,
                stray.as_object().cloned().unwrap_or_default(),
            )
            .await
            .unwrap();
        assert_eq!(queries.recent_posts().await.unwrap().len(), 1);

        // ...until a mutation invalidates the posts tag.
        queries.create_post(new_post("two")).await.unwrap();
        assert_eq!(queries.recent_posts().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn like_and_save_invalidate_the_feed() {
        let backend = Arc::new(MemoryBackend::new());
        let queries = query_client(backend);

        let post = queries.create_post(new_post("likeable")).await.unwrap();
        assert!(queries.recent_posts().await.unwrap()[0].likes.is_empty());

        queries
            .like_post(&post.id, vec!["user-2".to_string()])
            .await
            .unwrap();
        assert_eq!(queries.recent_posts().await.unwrap()[0].likes, vec!["user-2"]);

        let saved = queries.save_post(&post.id, "user-2").await.unwrap();
        queries.delete_saved_post(&saved.id).await.unwrap();
    }

    #[tokio::test]
    async fn sign_out_invalidates_the_cached_user() {
        let backend = Arc::new(MemoryBackend::new());
        let queries = query_client(backend);

        queries
            .create_user_account(NewUser {
                name: "Alice".to_string(),
                email: "a@b.com".to_string(),
                password: "secret1".to_string(),
                username: None,
            })
            .await
            .unwrap();
        queries
            .sign_in(Credentials {
                email: "a@b.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        assert!(queries.current_user().await.unwrap().is_some());

        // Sign-out invalidates the session tag, so the next read re-fetches
        // and sees no session.
        queries.sign_out().await.unwrap();
        assert!(queries.current_user().await.unwrap().is_none());
    }
}
