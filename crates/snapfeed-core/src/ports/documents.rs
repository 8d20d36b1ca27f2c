//! Document database port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::BackendError;

/// Logical collections this client shapes documents for. The adapter maps
/// each to its configured backend collection id at the point of use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Posts,
    Saves,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Posts => "posts",
            Collection::Saves => "saves",
        }
    }
}

/// A backend document: id, creation time and the attribute map.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub data: Map<String, Value>,
}

impl Document {
    /// Deserialize the document into an entity. The document id and creation
    /// time are merged into the attribute map first, so entity types can
    /// carry plain `id` / `createdAt` fields.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, BackendError> {
        let mut map = self.data.clone();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        if let Some(ts) = self.created_at {
            map.insert("createdAt".to_string(), Value::String(ts.to_rfc3339()));
        }
        serde_json::from_value(Value::Object(map)).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

/// Equality filter on a document attribute.
#[derive(Debug, Clone)]
pub enum Filter {
    Equal { attribute: String, value: Value },
}

/// Result ordering by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    CreatedAsc,
    CreatedDesc,
}

/// Query for a document listing: filters, ordering and a result limit.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn equal(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Equal {
            attribute: attribute.into(),
            value: value.into(),
        });
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.order = Some(Order::CreatedDesc);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Document collection surface of the hosted backend.
#[async_trait]
pub trait Documents: Send + Sync {
    /// Create a document with a backend-unique id.
    async fn create(
        &self,
        collection: Collection,
        data: Map<String, Value>,
    ) -> Result<Document, BackendError>;

    /// List documents matching a query.
    async fn list(
        &self,
        collection: Collection,
        query: ListQuery,
    ) -> Result<Vec<Document>, BackendError>;

    /// Partially update a document. Attributes present in `data` are
    /// replaced wholesale; there is no atomic array add/remove.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        data: Map<String, Value>,
    ) -> Result<Document, BackendError>;

    /// Delete a document.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Post;
    use serde_json::json;

    #[test]
    fn deserialize_merges_id_and_creation_time() {
        let data = json!({
            "creator": "user-1",
            "caption": "hello",
            "imageUrl": "https://example.test/preview",
            "imageId": "file-1",
            "location": "Berlin",
            "tags": ["a"],
            "likes": [],
        });

        let doc = Document {
            id: "doc-1".to_string(),
            created_at: Some("2024-03-01T12:00:00Z".parse().unwrap()),
            data: data.as_object().cloned().unwrap(),
        };

        let post: Post = doc.deserialize().unwrap();
        assert_eq!(post.id, "doc-1");
        assert_eq!(post.caption, "hello");
        assert!(post.created_at.is_some());
    }

    #[test]
    fn deserialize_rejects_missing_attributes() {
        let doc = Document {
            id: "doc-1".to_string(),
            created_at: None,
            data: serde_json::Map::new(),
        };

        assert!(doc.deserialize::<Post>().is_err());
    }
}
