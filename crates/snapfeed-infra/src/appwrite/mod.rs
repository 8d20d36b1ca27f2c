//! HTTP adapter for the hosted backend (Appwrite REST v1).
//!
//! One [`HttpBackend`] implements all four capability ports. Configuration
//! identifiers are resolved at the point of use: a missing collection or
//! bucket id fails the operation that needs it, nothing is validated
//! eagerly.

mod accounts;
mod avatars;
mod config;
mod documents;
mod http;
mod storage;

pub use config::AppwriteConfig;
pub use http::HttpBackend;
