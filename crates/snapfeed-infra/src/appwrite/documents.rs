//! Document collections over the REST surface.
//!
//! List queries are encoded in the backend's JSON query syntax and sent as
//! repeated `queries[]` parameters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use snapfeed_core::error::BackendError;
use snapfeed_core::ports::{Collection, Document, Documents, Filter, ListQuery, Order};

use super::http::HttpBackend;

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "$createdAt", default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    data: Map<String, Value>,
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        let mut data = raw.data;
        // Drop remaining system attributes ($permissions, $collectionId, ...).
        data.retain(|key, _| !key.starts_with('$'));
        Document {
            id: raw.id,
            created_at: raw.created_at,
            data,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDocumentList {
    documents: Vec<RawDocument>,
}

fn encode_queries(query: &ListQuery) -> Vec<String> {
    let mut encoded = Vec::new();

    for filter in &query.filters {
        let Filter::Equal { attribute, value } = filter;
        encoded.push(
            json!({
                "method": "equal",
                "attribute": attribute,
                "values": [value],
            })
            .to_string(),
        );
    }

    if let Some(order) = query.order {
        let method = match order {
            Order::CreatedAsc => "orderAsc",
            Order::CreatedDesc => "orderDesc",
        };
        encoded.push(json!({ "method": method, "attribute": "$createdAt" }).to_string());
    }

    if let Some(limit) = query.limit {
        encoded.push(json!({ "method": "limit", "values": [limit] }).to_string());
    }

    encoded
}

impl HttpBackend {
    fn documents_path(&self, collection: Collection) -> Result<String, BackendError> {
        let database = self.config().require_database_id()?;
        let collection_id = self.config().require_collection_id(collection)?;
        Ok(format!(
            "databases/{database}/collections/{collection_id}/documents"
        ))
    }
}

#[async_trait]
impl Documents for HttpBackend {
    async fn create(
        &self,
        collection: Collection,
        data: Map<String, Value>,
    ) -> Result<Document, BackendError> {
        let url = self.url(&self.documents_path(collection)?)?;
        let req = self.request(Method::POST, url)?.json(&json!({
            "documentId": Uuid::new_v4().to_string(),
            "data": data,
        }));

        let raw: RawDocument = self.send_json(req).await?;
        tracing::debug!(collection = collection.as_str(), document_id = %raw.id, "document created");
        Ok(raw.into())
    }

    async fn list(
        &self,
        collection: Collection,
        query: ListQuery,
    ) -> Result<Vec<Document>, BackendError> {
        let mut url = self.url(&self.documents_path(collection)?)?;
        {
            let mut pairs = url.query_pairs_mut();
            for encoded in encode_queries(&query) {
                pairs.append_pair("queries[]", &encoded);
            }
        }

        let req = self.request(Method::GET, url)?;
        let raw: RawDocumentList = self.send_json(req).await?;
        Ok(raw.documents.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        data: Map<String, Value>,
    ) -> Result<Document, BackendError> {
        let path = format!("{}/{id}", self.documents_path(collection)?);
        let url = self.url(&path)?;
        let req = self
            .request(Method::PATCH, url)?
            .json(&json!({ "data": data }));

        let raw: RawDocument = self.send_json(req).await?;
        Ok(raw.into())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), BackendError> {
        let path = format!("{}/{id}", self.documents_path(collection)?);
        let url = self.url(&path)?;
        let req = self.request(Method::DELETE, url)?;
        self.send(req).await?;
        tracing::debug!(collection = collection.as_str(), document_id = %id, "document deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_equality_order_and_limit() {
        let query = ListQuery::default()
            .equal("accountId", "abc")
            .newest_first()
            .limit(20);

        let encoded = encode_queries(&query);
        assert_eq!(encoded.len(), 3);
        assert_eq!(
            encoded[0],
            r#"{"attribute":"accountId","method":"equal","values":["abc"]}"#
        );
        assert_eq!(
            encoded[1],
            r#"{"attribute":"$createdAt","method":"orderDesc"}"#
        );
        assert_eq!(encoded[2], r#"{"method":"limit","values":[20]}"#);
    }

    #[test]
    fn empty_query_encodes_nothing() {
        assert!(encode_queries(&ListQuery::default()).is_empty());
    }
}
