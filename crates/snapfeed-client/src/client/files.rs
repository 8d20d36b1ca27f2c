//! Direct file operations, exposed for callers that manage media outside
//! the post-creation flow.

use snapfeed_core::domain::{FileUpload, StoredFile};
use snapfeed_core::error::DomainError;
use snapfeed_core::ports::PreviewOptions;

use super::Client;

impl Client {
    /// Upload a file to the content bucket.
    pub async fn upload_file(&self, file: FileUpload) -> Result<StoredFile, DomainError> {
        Ok(self.storage.upload(file).await?)
    }

    /// Preview URL for a stored file, at the fixed feed transformation.
    pub fn file_preview_url(&self, file_id: &str) -> Result<String, DomainError> {
        Ok(self
            .storage
            .preview_url(file_id, &PreviewOptions::default())?)
    }

    /// Delete a stored file.
    pub async fn delete_file(&self, file_id: &str) -> Result<(), DomainError> {
        Ok(self.storage.delete(file_id).await?)
    }
}
