use serde::{Deserialize, Serialize};

/// User profile document.
///
/// Created once per account at sign-up; `account_id` is the stable external
/// identity and never changes, the remaining profile fields may.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Document id.
    #[serde(default)]
    pub id: String,
    /// Stable backend account id this profile belongs to.
    pub account_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    /// Avatar or uploaded profile image URL.
    pub image_url: String,
}
