use serde::{Deserialize, Serialize};

/// Backend identity - created once at sign-up, distinct from the [`User`]
/// profile document that references it.
///
/// [`User`]: super::User
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Ephemeral credential created on sign-in and deleted on sign-out.
///
/// Only the "current" session is ever addressed by this client; there is no
/// multi-session handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// Account id this session authenticates.
    pub user_id: String,
    /// Opaque secret presented on subsequent requests. May be empty when the
    /// backend delivers the credential out of band (e.g. via cookie).
    pub secret: String,
}
