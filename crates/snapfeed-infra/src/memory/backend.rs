//! Fake backend holding accounts, documents and files in memory.
//!
//! Documents carry a monotonic sequence number so creation-time ordering is
//! deterministic even when two documents land in the same clock tick.
//! Failure injection flags let tests force individual steps to fail, and
//! file deletions are counted so compensating-delete behavior can be
//! asserted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use snapfeed_core::domain::{Account, FileUpload, Session, StoredFile};
use snapfeed_core::error::BackendError;
use snapfeed_core::ports::{
    Accounts, Avatars, Collection, Document, Documents, FileStorage, Filter, ListQuery, Order,
    PreviewOptions,
};

struct AccountRecord {
    account: Account,
    password: String,
}

struct StoredDocument {
    seq: u64,
    doc: Document,
}

/// In-memory implementation of the four backend ports.
#[derive(Default)]
pub struct MemoryBackend {
    accounts: RwLock<Vec<AccountRecord>>,
    current_account: RwLock<Option<String>>,
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
    files: RwLock<HashMap<String, StoredFile>>,
    seq: AtomicU64,
    file_deletes: AtomicUsize,
    fail_upload: AtomicBool,
    fail_preview: AtomicBool,
    fail_create_document: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next (and subsequent) uploads fail.
    pub fn fail_upload(&self, fail: bool) {
        self.fail_upload.store(fail, Ordering::SeqCst);
    }

    /// Make preview URL shaping fail.
    pub fn fail_preview(&self, fail: bool) {
        self.fail_preview.store(fail, Ordering::SeqCst);
    }

    /// Make document creation fail.
    pub fn fail_create_document(&self, fail: bool) {
        self.fail_create_document.store(fail, Ordering::SeqCst);
    }

    /// How many times `FileStorage::delete` has been called.
    pub fn file_delete_count(&self) -> usize {
        self.file_deletes.load(Ordering::SeqCst)
    }

    /// Whether a stored file still exists.
    pub async fn has_file(&self, file_id: &str) -> bool {
        self.files.read().await.contains_key(file_id)
    }

    /// Number of stored files.
    pub async fn stored_file_count(&self) -> usize {
        self.files.read().await.len()
    }

    fn injected(step: &str) -> BackendError {
        BackendError::Api {
            code: 500,
            kind: "general_server_error".to_string(),
            message: format!("injected {step} failure"),
        }
    }
}

#[async_trait]
impl Accounts for MemoryBackend {
    async fn create(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, BackendError> {
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|r| r.account.email == email) {
            return Err(BackendError::Api {
                code: 409,
                kind: "user_already_exists".to_string(),
                message: format!("an account with email {email} already exists"),
            });
        }

        let account = Account {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
        };
        accounts.push(AccountRecord {
            account: account.clone(),
            password: password.to_string(),
        });
        Ok(account)
    }

    async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let accounts = self.accounts.read().await;
        let record = accounts
            .iter()
            .find(|r| r.account.email == email && r.password == password)
            .ok_or(BackendError::Unauthenticated)?;

        let account_id = record.account.id.clone();
        drop(accounts);

        *self.current_account.write().await = Some(account_id.clone());
        Ok(Session {
            id: Uuid::new_v4().to_string(),
            user_id: account_id,
            secret: Uuid::new_v4().to_string(),
        })
    }

    async fn current(&self) -> Result<Account, BackendError> {
        let current = self.current_account.read().await;
        let account_id = current.as_ref().ok_or(BackendError::Unauthenticated)?;

        let accounts = self.accounts.read().await;
        accounts
            .iter()
            .find(|r| &r.account.id == account_id)
            .map(|r| r.account.clone())
            .ok_or(BackendError::Unauthenticated)
    }

    async fn delete_current_session(&self) -> Result<(), BackendError> {
        let mut current = self.current_account.write().await;
        if current.is_none() {
            return Err(BackendError::Unauthenticated);
        }
        *current = None;
        Ok(())
    }
}

#[async_trait]
impl Documents for MemoryBackend {
    async fn create(
        &self,
        collection: Collection,
        data: Map<String, Value>,
    ) -> Result<Document, BackendError> {
        if self.fail_create_document.load(Ordering::SeqCst) {
            return Err(Self::injected("document creation"));
        }

        let doc = Document {
            id: Uuid::new_v4().to_string(),
            created_at: Some(Utc::now()),
            data,
        };
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);

        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().push(StoredDocument {
            seq,
            doc: doc.clone(),
        });
        Ok(doc)
    }

    async fn list(
        &self,
        collection: Collection,
        query: ListQuery,
    ) -> Result<Vec<Document>, BackendError> {
        let collections = self.collections.read().await;
        let stored = collections.get(&collection);

        let mut matching: Vec<(u64, Document)> = stored
            .map(|docs| {
                docs.iter()
                    .filter(|d| matches_filters(&d.doc, &query.filters))
                    .map(|d| (d.seq, d.doc.clone()))
                    .collect()
            })
            .unwrap_or_default();

        match query.order {
            Some(Order::CreatedDesc) => matching.sort_by(|a, b| b.0.cmp(&a.0)),
            Some(Order::CreatedAsc) | None => matching.sort_by(|a, b| a.0.cmp(&b.0)),
        }

        if let Some(limit) = query.limit {
            matching.truncate(limit as usize);
        }

        Ok(matching.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        data: Map<String, Value>,
    ) -> Result<Document, BackendError> {
        let mut collections = self.collections.write().await;
        let stored = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.doc.id == id))
            .ok_or_else(|| BackendError::Api {
                code: 404,
                kind: "document_not_found".to_string(),
                message: format!("document {id} not found"),
            })?;

        // Whole-attribute replacement, matching backend semantics.
        for (key, value) in data {
            stored.doc.data.insert(key, value);
        }
        Ok(stored.doc.clone())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), BackendError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        let before = docs.len();
        docs.retain(|d| d.doc.id != id);

        if docs.len() == before {
            return Err(BackendError::Api {
                code: 404,
                kind: "document_not_found".to_string(),
                message: format!("document {id} not found"),
            });
        }
        Ok(())
    }
}

fn matches_filters(doc: &Document, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| {
        let Filter::Equal { attribute, value } = filter;
        doc.data.get(attribute) == Some(value)
    })
}

#[async_trait]
impl FileStorage for MemoryBackend {
    async fn upload(&self, file: FileUpload) -> Result<StoredFile, BackendError> {
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(Self::injected("upload"));
        }

        let stored = StoredFile {
            id: Uuid::new_v4().to_string(),
            name: file.name,
        };
        self.files
            .write()
            .await
            .insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    fn preview_url(&self, file_id: &str, options: &PreviewOptions) -> Result<String, BackendError> {
        if self.fail_preview.load(Ordering::SeqCst) {
            return Err(Self::injected("preview"));
        }

        Ok(format!(
            "memory://files/{file_id}/preview?width={}&height={}&gravity={}&quality={}",
            options.width,
            options.height,
            options.gravity.as_str(),
            options.quality,
        ))
    }

    async fn delete(&self, file_id: &str) -> Result<(), BackendError> {
        self.file_deletes.fetch_add(1, Ordering::SeqCst);

        if self.files.write().await.remove(file_id).is_none() {
            return Err(BackendError::Api {
                code: 404,
                kind: "storage_file_not_found".to_string(),
                message: format!("file {file_id} not found"),
            });
        }
        Ok(())
    }
}

impl Avatars for MemoryBackend {
    fn initials_url(&self, name: &str) -> Result<String, BackendError> {
        Ok(format!(
            "memory://avatars/initials?name={}",
            name.replace(' ', "+")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn session_lifecycle() {
        let backend = MemoryBackend::new();
        Accounts::create(&backend, "a@b.com", "secret1", "Alice")
            .await
            .unwrap();

        assert!(matches!(
            backend.current().await,
            Err(BackendError::Unauthenticated)
        ));

        let session = backend
            .create_email_session("a@b.com", "secret1")
            .await
            .unwrap();
        let account = backend.current().await.unwrap();
        assert_eq!(account.id, session.user_id);

        backend.delete_current_session().await.unwrap();
        assert!(matches!(
            backend.current().await,
            Err(BackendError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let backend = MemoryBackend::new();
        Accounts::create(&backend, "a@b.com", "secret1", "Alice")
            .await
            .unwrap();

        let result = backend.create_email_session("a@b.com", "wrong").await;
        assert!(matches!(result, Err(BackendError::Unauthenticated)));
    }

    #[tokio::test]
    async fn list_orders_newest_first_and_limits() {
        let backend = MemoryBackend::new();
        for i in 0..5 {
            Documents::create(&backend, Collection::Posts, attrs(json!({ "caption": i })))
                .await
                .unwrap();
        }

        let docs = backend
            .list(
                Collection::Posts,
                ListQuery::default().newest_first().limit(3),
            )
            .await
            .unwrap();

        let captions: Vec<i64> = docs
            .iter()
            .map(|d| d.data["caption"].as_i64().unwrap())
            .collect();
        assert_eq!(captions, vec![4, 3, 2]);
    }

    #[tokio::test]
    async fn update_replaces_attributes_wholesale() {
        let backend = MemoryBackend::new();
        let doc = Documents::create(
            &backend,
            Collection::Posts,
            attrs(json!({ "caption": "hi", "likes": ["u1"] })),
        )
        .await
        .unwrap();

        let updated = backend
            .update(
                Collection::Posts,
                &doc.id,
                attrs(json!({ "likes": ["u2", "u3"] })),
            )
            .await
            .unwrap();

        assert_eq!(updated.data["likes"], json!(["u2", "u3"]));
        assert_eq!(updated.data["caption"], json!("hi"));
    }
}
