//! File storage port.

use async_trait::async_trait;

use crate::domain::{FileUpload, StoredFile};
use crate::error::BackendError;

/// Crop gravity for preview rendering. The backend accepts a small fixed
/// set; modelling it as an enum keeps invalid values unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    Center,
    Top,
    TopLeft,
    TopRight,
    Left,
    Right,
    Bottom,
    BottomLeft,
    BottomRight,
}

impl Gravity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gravity::Center => "center",
            Gravity::Top => "top",
            Gravity::TopLeft => "top-left",
            Gravity::TopRight => "top-right",
            Gravity::Left => "left",
            Gravity::Right => "right",
            Gravity::Bottom => "bottom",
            Gravity::BottomLeft => "bottom-left",
            Gravity::BottomRight => "bottom-right",
        }
    }
}

/// Preview transformation parameters.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    pub width: u32,
    pub height: u32,
    pub gravity: Gravity,
    pub quality: u8,
}

/// Post images are previewed at a fixed 2000x2000 center crop at full
/// quality.
impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 2000,
            gravity: Gravity::Center,
            quality: 100,
        }
    }
}

/// File storage surface of the hosted backend (the content bucket).
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Upload a file under a backend-unique id.
    async fn upload(&self, file: FileUpload) -> Result<StoredFile, BackendError>;

    /// Shape the preview URL for a stored file. Synchronous: the URL is
    /// derived from configuration, no request is made.
    fn preview_url(&self, file_id: &str, options: &PreviewOptions) -> Result<String, BackendError>;

    /// Delete a stored file.
    async fn delete(&self, file_id: &str) -> Result<(), BackendError>;
}
