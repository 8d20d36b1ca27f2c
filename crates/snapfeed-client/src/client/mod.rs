//! The domain operations module.
//!
//! [`Client`] holds the four backend capability ports and exposes one typed
//! method per operation. Every method returns `Result`; callers branch on
//! the error variant, never on a sentinel value.

mod auth;
mod files;
mod posts;

use std::sync::Arc;

use serde_json::{Map, Value};

use snapfeed_core::ports::{Accounts, Avatars, Documents, FileStorage};

/// Typed client over the four backend capability surfaces.
pub struct Client {
    accounts: Arc<dyn Accounts>,
    documents: Arc<dyn Documents>,
    storage: Arc<dyn FileStorage>,
    avatars: Arc<dyn Avatars>,
}

impl Client {
    pub fn new(
        accounts: Arc<dyn Accounts>,
        documents: Arc<dyn Documents>,
        storage: Arc<dyn FileStorage>,
        avatars: Arc<dyn Avatars>,
    ) -> Self {
        Self {
            accounts,
            documents,
            storage,
            avatars,
        }
    }

    /// Wire all four ports from one backend, for adapters that implement
    /// every capability (the HTTP and in-memory backends both do).
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: Accounts + Documents + FileStorage + Avatars + 'static,
    {
        Self {
            accounts: backend.clone(),
            documents: backend.clone(),
            storage: backend.clone(),
            avatars: backend,
        }
    }
}

/// The `json!` literals building document payloads are always objects.
pub(crate) fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}
