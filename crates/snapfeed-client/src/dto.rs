//! Request types for the domain operations.

use serde::{Deserialize, Serialize};

use snapfeed_core::domain::FileUpload;

/// Input for account creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub username: Option<String>,
}

/// Email/password credentials for sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Input for post creation. `tags` is the raw comma-separated string from
/// the form; it is parsed during the operation.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// User document id of the author.
    pub creator_id: String,
    pub caption: String,
    pub image: FileUpload,
    pub location: String,
    pub tags: Option<String>,
}
