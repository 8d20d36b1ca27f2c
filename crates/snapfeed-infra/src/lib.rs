//! # Snapfeed Infrastructure
//!
//! Concrete implementations of the ports defined in `snapfeed-core`:
//!
//! - `appwrite` - HTTP adapter for the hosted backend (Appwrite REST v1).
//! - `memory` - in-memory fake backend for tests and offline runs.
//! - `cache` - tag-aware in-memory cache backing the query layer.

pub mod appwrite;
pub mod cache;
pub mod memory;

pub use appwrite::{AppwriteConfig, HttpBackend};
pub use cache::InMemoryCache;
pub use memory::MemoryBackend;
