//! Avatar generation port.

use crate::error::BackendError;

/// Avatar surface of the hosted backend. URL shaping only - the image is
/// rendered by the backend when the URL is fetched.
pub trait Avatars: Send + Sync {
    /// URL of a generated initials avatar for a display name.
    fn initials_url(&self, name: &str) -> Result<String, BackendError>;
}
