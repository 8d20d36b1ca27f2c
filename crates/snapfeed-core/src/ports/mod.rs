//! Ports - trait definitions for the four backend capability surfaces and
//! the cache. These are the "interfaces" that infrastructure must implement.

mod accounts;
mod avatars;
mod cache;
mod documents;
mod storage;

pub use accounts::Accounts;
pub use avatars::Avatars;
pub use cache::{Cache, CacheError};
pub use documents::{Collection, Document, Documents, Filter, ListQuery, Order};
pub use storage::{FileStorage, Gravity, PreviewOptions};
