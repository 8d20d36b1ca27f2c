//! Post, like and bookmark operations.

use serde_json::json;

use snapfeed_core::domain::{Post, SavedPost};
use snapfeed_core::error::DomainError;
use snapfeed_core::ports::{Collection, ListQuery, PreviewOptions};

use crate::dto::NewPost;

use super::{Client, object};

/// The feed reads at most this many posts, newest first.
const RECENT_POSTS_LIMIT: u32 = 20;

impl Client {
    /// Publish a post: upload the image, shape its preview URL, then create
    /// the post document.
    ///
    /// The uploaded file is deleted again (exactly one attempt) when preview
    /// shaping or document creation fails, so no post ever references a file
    /// without a usable preview and no file is left orphaned.
    pub async fn create_post(&self, new_post: NewPost) -> Result<Post, DomainError> {
        let file = self.storage.upload(new_post.image).await?;

        let image_url = match self.storage.preview_url(&file.id, &PreviewOptions::default()) {
            Ok(url) => url,
            Err(e) => {
                self.discard_file(&file.id).await;
                return Err(DomainError::ImagePreparation(e));
            }
        };

        let tags = parse_tags(new_post.tags.as_deref());
        let data = object(json!({
            "creator": new_post.creator_id,
            "caption": new_post.caption,
            "imageUrl": image_url,
            "imageId": file.id.clone(),
            "location": new_post.location,
            "tags": tags,
            "likes": [],
        }));

        let doc = match self.documents.create(Collection::Posts, data).await {
            Ok(doc) => doc,
            Err(e) => {
                self.discard_file(&file.id).await;
                return Err(e.into());
            }
        };

        let post: Post = doc.deserialize()?;
        tracing::info!(post_id = %post.id, "post created");
        Ok(post)
    }

    /// Compensating delete for a file orphaned by a failed post creation.
    /// A failure here only leaves an orphan behind, so it is logged and
    /// swallowed rather than masking the original error.
    async fn discard_file(&self, file_id: &str) {
        if let Err(e) = self.storage.delete(file_id).await {
            tracing::warn!(file_id = %file_id, error = %e, "failed to delete orphaned file");
        }
    }

    /// The most recent posts, newest first, at most 20.
    pub async fn recent_posts(&self) -> Result<Vec<Post>, DomainError> {
        let docs = self
            .documents
            .list(
                Collection::Posts,
                ListQuery::default()
                    .newest_first()
                    .limit(RECENT_POSTS_LIMIT),
            )
            .await?;

        docs.iter()
            .map(|doc| doc.deserialize().map_err(Into::into))
            .collect()
    }

    /// Replace the full liker list of a post.
    ///
    /// This is a whole-array replace, not an atomic add/remove: two clients
    /// liking concurrently race and the last write wins, silently dropping
    /// the other client's like.
    pub async fn like_post(&self, post_id: &str, likes: Vec<String>) -> Result<Post, DomainError> {
        let doc = self
            .documents
            .update(Collection::Posts, post_id, object(json!({ "likes": likes })))
            .await?;
        Ok(doc.deserialize()?)
    }

    /// Bookmark a post for a user.
    pub async fn save_post(&self, post_id: &str, user_id: &str) -> Result<SavedPost, DomainError> {
        let doc = self
            .documents
            .create(
                Collection::Saves,
                object(json!({ "user": user_id, "post": post_id })),
            )
            .await?;
        Ok(doc.deserialize()?)
    }

    /// Remove a bookmark by its join-document id.
    pub async fn delete_saved_post(&self, saved_post_id: &str) -> Result<(), DomainError> {
        self.documents
            .delete(Collection::Saves, saved_post_id)
            .await?;
        Ok(())
    }
}

/// Parse the comma-separated tags string: spaces are stripped first, and an
/// empty or absent input yields no tags rather than one empty tag.
fn parse_tags(tags: Option<&str>) -> Vec<String> {
    let stripped: String = tags
        .unwrap_or_default()
        .chars()
        .filter(|c| *c != ' ')
        .collect();

    if stripped.is_empty() {
        return Vec::new();
    }
    stripped.split(',').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use snapfeed_core::domain::FileUpload;
    use snapfeed_infra::MemoryBackend;

    use super::*;

    fn image() -> FileUpload {
        FileUpload {
            name: "photo.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        }
    }

    fn new_post(caption: &str) -> NewPost {
        NewPost {
            creator_id: "user-1".to_string(),
            caption: caption.to_string(),
            image: image(),
            location: "Berlin".to_string(),
            tags: Some("art, travel".to_string()),
        }
    }

    #[test]
    fn tags_are_split_on_commas_with_spaces_stripped() {
        assert_eq!(parse_tags(Some("a, b ,c")), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_or_absent_tags_yield_no_tags() {
        assert_eq!(parse_tags(Some("")), Vec::<String>::new());
        assert_eq!(parse_tags(Some("   ")), Vec::<String>::new());
        assert_eq!(parse_tags(None), Vec::<String>::new());
    }

    #[tokio::test]
    async fn create_post_stores_image_and_parsed_tags() {
        let backend = Arc::new(MemoryBackend::new());
        let client = Client::from_backend(backend.clone());

        let post = client.create_post(new_post("first!")).await.unwrap();

        assert_eq!(post.caption, "first!");
        assert_eq!(post.tags, vec!["art", "travel"]);
        assert!(post.likes.is_empty());
        assert!(post.image_url.contains(&post.image_id));
        assert!(backend.has_file(&post.image_id).await);
    }

    #[tokio::test]
    async fn preview_failure_deletes_the_uploaded_file_once() {
        let backend = Arc::new(MemoryBackend::new());
        let client = Client::from_backend(backend.clone());
        backend.fail_preview(true);

        let result = client.create_post(new_post("doomed")).await;

        assert!(matches!(result, Err(DomainError::ImagePreparation(_))));
        assert_eq!(backend.file_delete_count(), 1);
        assert_eq!(backend.stored_file_count().await, 0);
    }

    #[tokio::test]
    async fn document_failure_deletes_the_uploaded_file_once() {
        let backend = Arc::new(MemoryBackend::new());
        let client = Client::from_backend(backend.clone());
        backend.fail_create_document(true);

        let result = client.create_post(new_post("doomed")).await;

        assert!(result.is_err());
        assert_eq!(backend.file_delete_count(), 1);
        assert_eq!(backend.stored_file_count().await, 0);
    }

    #[tokio::test]
    async fn upload_failure_creates_nothing_and_deletes_nothing() {
        let backend = Arc::new(MemoryBackend::new());
        let client = Client::from_backend(backend.clone());
        backend.fail_upload(true);

        let result = client.create_post(new_post("doomed")).await;

        assert!(result.is_err());
        assert_eq!(backend.file_delete_count(), 0);
        assert!(client.recent_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_posts_caps_at_twenty_newest_first() {
        let backend = Arc::new(MemoryBackend::new());
        let client = Client::from_backend(backend);

        for i in 0..25 {
            client.create_post(new_post(&format!("post {i}"))).await.unwrap();
        }

        let posts = client.recent_posts().await.unwrap();
        assert_eq!(posts.len(), 20);
        assert_eq!(posts[0].caption, "post 24");
        assert_eq!(posts[19].caption, "post 5");
    }

    /// Documents the last-write-wins behavior of the whole-array replace:
    /// the second caller's list overwrites the first, dropping its like.
    #[tokio::test]
    async fn concurrent_likes_are_last_write_wins() {
        let backend = Arc::new(MemoryBackend::new());
        let client = Client::from_backend(backend);

        let post = client.create_post(new_post("raced")).await.unwrap();

        // Both clients read likes = [] and compute their own replacement.
        client
            .like_post(&post.id, vec!["user-a".to_string()])
            .await
            .unwrap();
        let updated = client
            .like_post(&post.id, vec!["user-b".to_string()])
            .await
            .unwrap();

        assert_eq!(updated.likes, vec!["user-b"]);
    }

    #[tokio::test]
    async fn save_and_unsave_roundtrip() {
        let backend = Arc::new(MemoryBackend::new());
        let client = Client::from_backend(backend.clone());

        let post = client.create_post(new_post("keeper")).await.unwrap();
        let saved = client.save_post(&post.id, "user-1").await.unwrap();
        assert_eq!(saved.post, post.id);
        assert_eq!(saved.user, "user-1");

        client.delete_saved_post(&saved.id).await.unwrap();
        let result = client.delete_saved_post(&saved.id).await;
        assert!(result.is_err());
    }
}
