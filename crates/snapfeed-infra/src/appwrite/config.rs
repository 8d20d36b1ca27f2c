//! Backend configuration, constructed at process start and passed into the
//! adapter. No global state; tests build it directly.

use std::env;

use snapfeed_core::error::BackendError;
use snapfeed_core::ports::Collection;

/// Identifiers addressing the hosted backend. Every field is optional at
/// load time; absence is an error raised by the operation that first needs
/// the value.
#[derive(Debug, Clone, Default)]
pub struct AppwriteConfig {
    pub endpoint: Option<String>,
    pub project_id: Option<String>,
    pub database_id: Option<String>,
    pub user_collection_id: Option<String>,
    pub post_collection_id: Option<String>,
    pub saves_collection_id: Option<String>,
    pub storage_bucket_id: Option<String>,
}

impl AppwriteConfig {
    /// Load configuration from `APPWRITE_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("APPWRITE_ENDPOINT").ok(),
            project_id: env::var("APPWRITE_PROJECT_ID").ok(),
            database_id: env::var("APPWRITE_DATABASE_ID").ok(),
            user_collection_id: env::var("APPWRITE_USER_COLLECTION_ID").ok(),
            post_collection_id: env::var("APPWRITE_POST_COLLECTION_ID").ok(),
            saves_collection_id: env::var("APPWRITE_SAVES_COLLECTION_ID").ok(),
            storage_bucket_id: env::var("APPWRITE_STORAGE_ID").ok(),
        }
    }

    pub fn require_endpoint(&self) -> Result<&str, BackendError> {
        require(&self.endpoint, "endpoint URL (APPWRITE_ENDPOINT)")
    }

    pub fn require_project_id(&self) -> Result<&str, BackendError> {
        require(&self.project_id, "project id (APPWRITE_PROJECT_ID)")
    }

    pub fn require_database_id(&self) -> Result<&str, BackendError> {
        require(&self.database_id, "database id (APPWRITE_DATABASE_ID)")
    }

    pub fn require_collection_id(&self, collection: Collection) -> Result<&str, BackendError> {
        match collection {
            Collection::Users => require(
                &self.user_collection_id,
                "user collection id (APPWRITE_USER_COLLECTION_ID)",
            ),
            Collection::Posts => require(
                &self.post_collection_id,
                "post collection id (APPWRITE_POST_COLLECTION_ID)",
            ),
            Collection::Saves => require(
                &self.saves_collection_id,
                "saves collection id (APPWRITE_SAVES_COLLECTION_ID)",
            ),
        }
    }

    pub fn require_bucket_id(&self) -> Result<&str, BackendError> {
        require(&self.storage_bucket_id, "storage bucket id (APPWRITE_STORAGE_ID)")
    }
}

fn require<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, BackendError> {
    value
        .as_deref()
        .ok_or(BackendError::MissingConfig(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bucket_id_is_an_error_at_use_time() {
        let config = AppwriteConfig {
            endpoint: Some("https://cloud.appwrite.io/v1".into()),
            project_id: Some("proj".into()),
            ..Default::default()
        };

        // Present values resolve, absent ones fail with the field name.
        assert!(config.require_endpoint().is_ok());
        let err = config.require_bucket_id().unwrap_err();
        assert!(matches!(err, BackendError::MissingConfig(name) if name.contains("bucket")));
    }
}
