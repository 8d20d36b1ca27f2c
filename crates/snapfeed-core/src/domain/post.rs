use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Published post document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Document id.
    #[serde(default)]
    pub id: String,
    /// User document id of the author.
    pub creator: String,
    pub caption: String,
    /// Preview URL of the uploaded image.
    pub image_url: String,
    /// Storage reference of the uploaded image.
    pub image_id: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// User document ids that liked this post. Updated by full replacement,
    /// not by atomic add/remove.
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Bookmark join document: one user saving one post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPost {
    /// Document id - needed again to delete the bookmark.
    #[serde(default)]
    pub id: String,
    /// User document id.
    pub user: String,
    /// Post document id.
    pub post: String,
}
