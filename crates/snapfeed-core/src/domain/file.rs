use serde::{Deserialize, Serialize};

/// Outbound binary payload for the content bucket.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original file name, kept for the backend's metadata.
    pub name: String,
    /// MIME type, e.g. `image/jpeg`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Handle to a binary object stored in the content bucket.
///
/// Referenced from `Post::image_id`; deleted again when a failed post
/// creation orphans it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: String,
    pub name: String,
}
