//! Request plumbing shared by the capability implementations.

use std::sync::RwLock;

use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use snapfeed_core::error::BackendError;

use super::config::AppwriteConfig;

/// Response format version pinned so backend upgrades cannot change the
/// wire shape underneath us.
const RESPONSE_FORMAT: &str = "1.5.0";

/// HTTP adapter for the hosted backend.
///
/// Holds the shared HTTP client, the configuration and the current session
/// secret. The secret is set by `create_email_session`, sent on every
/// subsequent request and cleared on sign-out.
pub struct HttpBackend {
    http: reqwest::Client,
    config: AppwriteConfig,
    session: RwLock<Option<String>>,
}

impl HttpBackend {
    pub fn new(config: AppwriteConfig) -> Self {
        Self::with_session(config, None)
    }

    /// Construct with a previously persisted session secret, so a CLI can
    /// stay signed in across processes.
    pub fn with_session(config: AppwriteConfig, session: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session: RwLock::new(session),
        }
    }

    pub fn config(&self) -> &AppwriteConfig {
        &self.config
    }

    /// The current session secret, if signed in.
    pub fn session_secret(&self) -> Option<String> {
        self.session.read().expect("session lock poisoned").clone()
    }

    pub(crate) fn set_session(&self, secret: Option<String>) {
        *self.session.write().expect("session lock poisoned") = secret;
    }

    /// Build an absolute URL under the configured endpoint.
    pub(crate) fn url(&self, path: &str) -> Result<Url, BackendError> {
        let endpoint = self.config.require_endpoint()?;
        let raw = format!("{}/{}", endpoint.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| BackendError::Decode(format!("invalid endpoint URL: {e}")))
    }

    /// Start a request carrying the project header and, when signed in, the
    /// session header.
    pub(crate) fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, BackendError> {
        let mut req = self
            .http
            .request(method, url)
            .header("X-Appwrite-Project", self.config.require_project_id()?)
            .header("X-Appwrite-Response-Format", RESPONSE_FORMAT);

        if let Some(secret) = self.session_secret() {
            req = req.header("X-Appwrite-Session", secret);
        }

        Ok(req)
    }

    /// Send a request, mapping transport failures and non-2xx responses.
    pub(crate) async fn send(&self, req: RequestBuilder) -> Result<Response, BackendError> {
        let resp = req
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        check(resp).await
    }

    /// Send a request and decode the JSON response body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<T, BackendError> {
        let resp = self.send(req).await?;
        resp.json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

/// Appwrite error body shape.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: String,
}

async fn check(resp: Response) -> Result<Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let code = status.as_u16();
    let body = resp.json::<ApiErrorBody>().await.unwrap_or_default();

    if code == 401 {
        tracing::debug!(kind = %body.kind, "request was not authenticated");
        return Err(BackendError::Unauthenticated);
    }

    tracing::warn!(code, kind = %body.kind, message = %body.message, "backend rejected request");
    Err(BackendError::Api {
        code,
        kind: body.kind,
        message: body.message,
    })
}
