//! Content bucket over the REST surface.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use uuid::Uuid;

use snapfeed_core::domain::{FileUpload, StoredFile};
use snapfeed_core::error::BackendError;
use snapfeed_core::ports::{FileStorage, PreviewOptions};

use super::http::HttpBackend;

#[derive(Debug, Deserialize)]
struct RawFile {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    name: String,
}

#[async_trait]
impl FileStorage for HttpBackend {
    async fn upload(&self, file: FileUpload) -> Result<StoredFile, BackendError> {
        let bucket = self.config().require_bucket_id()?;
        let url = self.url(&format!("storage/buckets/{bucket}/files"))?;

        let part = Part::bytes(file.bytes)
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| BackendError::Decode(format!("invalid content type: {e}")))?;
        let form = Form::new()
            .text("fileId", Uuid::new_v4().to_string())
            .part("file", part);

        let req = self.request(Method::POST, url)?.multipart(form);
        let raw: RawFile = self.send_json(req).await?;
        tracing::debug!(file_id = %raw.id, name = %raw.name, "file uploaded");

        Ok(StoredFile {
            id: raw.id,
            name: raw.name,
        })
    }

    fn preview_url(&self, file_id: &str, options: &PreviewOptions) -> Result<String, BackendError> {
        let bucket = self.config().require_bucket_id()?;
        let project = self.config().require_project_id()?;
        let mut url = self.url(&format!(
            "storage/buckets/{bucket}/files/{file_id}/preview"
        ))?;

        url.query_pairs_mut()
            .append_pair("width", &options.width.to_string())
            .append_pair("height", &options.height.to_string())
            .append_pair("gravity", options.gravity.as_str())
            .append_pair("quality", &options.quality.to_string())
            .append_pair("project", project);

        Ok(url.into())
    }

    async fn delete(&self, file_id: &str) -> Result<(), BackendError> {
        let bucket = self.config().require_bucket_id()?;
        let url = self.url(&format!("storage/buckets/{bucket}/files/{file_id}"))?;
        let req = self.request(Method::DELETE, url)?;
        self.send(req).await?;
        tracing::debug!(file_id = %file_id, "file deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appwrite::AppwriteConfig;

    fn backend() -> HttpBackend {
        HttpBackend::new(AppwriteConfig {
            endpoint: Some("https://cloud.appwrite.io/v1".into()),
            project_id: Some("proj123".into()),
            storage_bucket_id: Some("bucket456".into()),
            ..Default::default()
        })
    }

    #[test]
    fn preview_url_uses_fixed_transformation() {
        let url = backend()
            .preview_url("file789", &PreviewOptions::default())
            .unwrap();

        assert!(url.starts_with(
            "https://cloud.appwrite.io/v1/storage/buckets/bucket456/files/file789/preview?"
        ));
        assert!(url.contains("width=2000"));
        assert!(url.contains("height=2000"));
        assert!(url.contains("gravity=center"));
        assert!(url.contains("quality=100"));
        assert!(url.contains("project=proj123"));
    }

    #[test]
    fn preview_url_without_bucket_id_fails() {
        let backend = HttpBackend::new(AppwriteConfig {
            endpoint: Some("https://cloud.appwrite.io/v1".into()),
            project_id: Some("proj123".into()),
            ..Default::default()
        });

        let err = backend
            .preview_url("file789", &PreviewOptions::default())
            .unwrap_err();
        assert!(matches!(err, BackendError::MissingConfig(_)));
    }
}
