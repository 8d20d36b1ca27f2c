//! Generated avatars over the REST surface. URL shaping only.

use snapfeed_core::error::BackendError;
use snapfeed_core::ports::Avatars;

use super::http::HttpBackend;

impl Avatars for HttpBackend {
    fn initials_url(&self, name: &str) -> Result<String, BackendError> {
        let project = self.config().require_project_id()?;
        let mut url = self.url("avatars/initials")?;
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("project", project);
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appwrite::AppwriteConfig;

    #[test]
    fn initials_url_encodes_the_name() {
        let backend = HttpBackend::new(AppwriteConfig {
            endpoint: Some("https://cloud.appwrite.io/v1".into()),
            project_id: Some("proj123".into()),
            ..Default::default()
        });

        let url = backend.initials_url("Ada Lovelace").unwrap();
        assert!(url.starts_with("https://cloud.appwrite.io/v1/avatars/initials?"));
        assert!(url.contains("name=Ada+Lovelace"));
        assert!(url.contains("project=proj123"));
    }
}
