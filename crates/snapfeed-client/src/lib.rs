//! # Snapfeed Client
//!
//! The domain operations module and the query/cache layer. Operations are
//! typed request/response methods over the backend ports; the query layer
//! wraps them with a tag-invalidated cache.

pub mod client;
pub mod dto;
pub mod query;

pub use client::Client;
pub use query::QueryClient;
