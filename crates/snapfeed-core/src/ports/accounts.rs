//! Accounts and sessions port.

use async_trait::async_trait;

use crate::domain::{Account, Session};
use crate::error::BackendError;

/// Account and session surface of the hosted backend.
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Create a new account.
    async fn create(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, BackendError>;

    /// Create a session from email/password credentials. The adapter keeps
    /// the session for subsequent authenticated calls.
    async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError>;

    /// The account of the current session.
    /// Fails with [`BackendError::Unauthenticated`] when there is none.
    async fn current(&self) -> Result<Account, BackendError>;

    /// Delete the current session.
    async fn delete_current_session(&self) -> Result<(), BackendError>;
}
