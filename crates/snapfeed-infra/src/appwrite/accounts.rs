//! Accounts and sessions over the REST surface.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use snapfeed_core::domain::{Account, Session};
use snapfeed_core::error::BackendError;
use snapfeed_core::ports::Accounts;

use super::http::HttpBackend;

#[derive(Debug, Deserialize)]
struct RawAccount {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

impl From<RawAccount> for Account {
    fn from(raw: RawAccount) -> Self {
        Account {
            id: raw.id,
            name: raw.name,
            email: raw.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSession {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "userId")]
    user_id: String,
    /// Present for server-side clients; browser clients get a cookie
    /// instead.
    #[serde(default)]
    secret: String,
}

#[async_trait]
impl Accounts for HttpBackend {
    async fn create(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, BackendError> {
        let url = self.url("account")?;
        let req = self.request(Method::POST, url)?.json(&json!({
            "userId": Uuid::new_v4().to_string(),
            "email": email,
            "password": password,
            "name": name,
        }));

        let raw: RawAccount = self.send_json(req).await?;
        tracing::debug!(account_id = %raw.id, "account created");
        Ok(raw.into())
    }

    async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let url = self.url("account/sessions/email")?;
        let req = self.request(Method::POST, url)?.json(&json!({
            "email": email,
            "password": password,
        }));

        let raw: RawSession = self.send_json(req).await?;
        if !raw.secret.is_empty() {
            self.set_session(Some(raw.secret.clone()));
        }
        tracing::debug!(session_id = %raw.id, "session created");

        Ok(Session {
            id: raw.id,
            user_id: raw.user_id,
            secret: raw.secret,
        })
    }

    async fn current(&self) -> Result<Account, BackendError> {
        let url = self.url("account")?;
        let req = self.request(Method::GET, url)?;
        let raw: RawAccount = self.send_json(req).await?;
        Ok(raw.into())
    }

    async fn delete_current_session(&self) -> Result<(), BackendError> {
        let url = self.url("account/sessions/current")?;
        let req = self.request(Method::DELETE, url)?;
        self.send(req).await?;
        self.set_session(None);
        tracing::debug!("session deleted");
        Ok(())
    }
}
