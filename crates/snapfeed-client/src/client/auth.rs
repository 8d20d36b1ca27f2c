//! Account, session and current-user operations.

use serde_json::json;

use snapfeed_core::domain::{Account, Session, User};
use snapfeed_core::error::{BackendError, DomainError};
use snapfeed_core::ports::{Collection, ListQuery};

use crate::dto::{Credentials, NewUser};

use super::{Client, object};

impl Client {
    /// Create a backend account, then the matching user profile document
    /// with a generated initials avatar.
    pub async fn create_user_account(&self, new_user: NewUser) -> Result<User, DomainError> {
        let account = self
            .accounts
            .create(&new_user.email, &new_user.password, &new_user.name)
            .await?;
        let image_url = self.avatars.initials_url(&account.name)?;

        let user = self
            .save_user(&account, new_user.username, image_url)
            .await?;
        tracing::info!(account_id = %account.id, user_id = %user.id, "user account created");
        Ok(user)
    }

    async fn save_user(
        &self,
        account: &Account,
        username: Option<String>,
        image_url: String,
    ) -> Result<User, DomainError> {
        let data = object(json!({
            "accountId": account.id.clone(),
            "name": account.name.clone(),
            "email": account.email.clone(),
            "username": username,
            "imageUrl": image_url,
        }));

        let doc = self.documents.create(Collection::Users, data).await?;
        Ok(doc.deserialize()?)
    }

    /// Sign in with email/password. The backend adapter keeps the session
    /// for subsequent calls.
    pub async fn sign_in(&self, credentials: Credentials) -> Result<Session, DomainError> {
        let session = self
            .accounts
            .create_email_session(&credentials.email, &credentials.password)
            .await?;
        tracing::info!(session_id = %session.id, "signed in");
        Ok(session)
    }

    /// Delete the current session.
    pub async fn sign_out(&self) -> Result<(), DomainError> {
        self.accounts.delete_current_session().await?;
        tracing::info!("signed out");
        Ok(())
    }

    /// The backend account of the current session.
    pub async fn account(&self) -> Result<Account, DomainError> {
        Ok(self.accounts.current().await?)
    }

    /// The user profile document of the current session.
    ///
    /// Yields `Ok(None)` when not signed in or when no profile document
    /// matches the account id; only genuine backend failures are errors.
    pub async fn current_user(&self) -> Result<Option<User>, DomainError> {
        let account = match self.accounts.current().await {
            Ok(account) => account,
            Err(BackendError::Unauthenticated) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let docs = self
            .documents
            .list(
                Collection::Users,
                ListQuery::default().equal("accountId", account.id.clone()),
            )
            .await?;

        match docs.first() {
            Some(doc) => Ok(Some(doc.deserialize()?)),
            None => Ok(None),
        }
    }
}
