use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::config::FirestoreConfig;
use crate::error::{AppError, AppResult};
use crate::http_client::HttpClient;
use crate::models::{ItemDocument, ItemRecord, ItemType, RecordId};

use super::RecordStore;

/// Firestore REST backend.
pub struct FirestoreBackend {
    http: HttpClient,
    documents_url: String,
    collection: String,
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RunQueryResponse {
    #[serde(default)]
    document: Option<FirestoreDocument>,
}

impl FirestoreBackend {
    pub fn new(config: &FirestoreConfig, collection: &str) -> AppResult<Self> {
        Ok(Self {
            http: HttpClient::new(config.api_key.clone())?,
            documents_url: config.documents_url(),
            collection: collection.to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.documents_url, self.collection)
    }

    fn query_body(&self) -> Value {
        json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.collection }],
                "orderBy": [{
                    "field": { "fieldPath": "date" },
                    "direction": "DESCENDING"
                }]
            }
        })
    }

    /// Reads at most one document, projected to its `date` field.
    fn ping_body(&self) -> Value {
        json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.collection }],
                "select": { "fields": [{ "fieldPath": "date" }] },
                "limit": 1
            }
        })
    }
}

fn string_value(value: &str) -> Value {
    json!({ "stringValue": value })
}

/// Encodes a document as Firestore `fields`.
fn encode_fields(doc: &ItemDocument) -> Value {
    let mut fields = Map::new();
    fields.insert("item_name".into(), string_value(&doc.item_name));
    fields.insert("item_type".into(), string_value(doc.item_type.as_str()));
    fields.insert("description".into(), string_value(&doc.description));
    fields.insert("location".into(), string_value(&doc.location));
    fields.insert("date".into(), string_value(&doc.date));
    if let Some(image_data) = &doc.image_data {
        fields.insert("imageData".into(), string_value(image_data));
    }
    json!({ "fields": fields })
}

fn read_string(fields: &HashMap<String, Value>, key: &str) -> Option<String> {
    let value = fields.get(key)?;
    value
        .get("stringValue")
        .or_else(|| value.get("timestampValue"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Last path segment of `projects/../documents/<collection>/<id>`.
fn document_id(name: &str) -> Option<RecordId> {
    name.rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(RecordId::new)
}

fn decode_document(doc: &FirestoreDocument) -> AppResult<ItemRecord> {
    let malformed = |what: &str| AppError::Storage(format!("document {}: {}", doc.name, what));
    let id = document_id(&doc.name).ok_or_else(|| malformed("no id"))?;
    let required = |key: &str| {
        read_string(&doc.fields, key).ok_or_else(|| malformed(&format!("missing {}", key)))
    };
    let item_type = ItemType::parse(&required("item_type")?)
        .ok_or_else(|| malformed("unknown item_type"))?;

    Ok(ItemRecord::from_document(
        id,
        ItemDocument {
            item_name: required("item_name")?,
            item_type,
            description: required("description")?,
            location: required("location")?,
            date: required("date")?,
            image_data: read_string(&doc.fields, "imageData"),
        },
    ))
}

#[tonic::async_trait]
impl RecordStore for FirestoreBackend {
    async fn insert(&self, document: &ItemDocument) -> AppResult<RecordId> {
        let created: FirestoreDocument = self
            .http
            .post_json(&self.collection_url(), &encode_fields(document))
            .await?;
        document_id(&created.name)
            .ok_or_else(|| AppError::Storage(format!("unexpected document name: {}", created.name)))
    }

    async fn list_by_date_desc(&self) -> AppResult<Vec<ItemRecord>> {
        let url = format!("{}:runQuery", self.documents_url);
        let responses: Vec<RunQueryResponse> =
            self.http.post_json(&url, &self.query_body()).await?;

        let mut records = Vec::with_capacity(responses.len());
        for doc in responses.iter().filter_map(|r| r.document.as_ref()) {
            match decode_document(doc) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping malformed document: {}", e),
            }
        }
        Ok(records)
    }

    async fn delete(&self, id: &RecordId) -> AppResult<()> {
        let url = format!("{}/{}", self.collection_url(), id);
        self.http.delete(&url).await?;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        let url = format!("{}:runQuery", self.documents_url);
        let _: Vec<Value> = self.http.post_json(&url, &self.ping_body()).await?;
        Ok(())
    }

    fn collection(&self) -> &str {
        &self.collection
    }
}
