//! In-memory store implementing the subset of the Elasticsearch API the
//! service uses. Intended for tests and local development.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::client::{ElasticClient, StoreResponse};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
struct StoredDocument {
    version: u64,
    source: Value,
}

/// Recorded request, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
}

/// In-memory implementation of ElasticClient
#[derive(Debug, Default)]
pub struct InMemoryElasticClient {
    indices: RwLock<HashMap<String, BTreeMap<String, StoredDocument>>>,
    templates: RwLock<BTreeMap<String, Value>>,
    requests: RwLock<Vec<RecordedRequest>>,
    unreachable: RwLock<bool>,
    template_status: RwLock<Option<u16>>,
    write_status: RwLock<Option<u16>>,
}

impl InMemoryElasticClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every request with a transport error
    pub fn unreachable(self) -> Self {
        *self.unreachable.write().unwrap() = true;
        self
    }

    /// Answer template uploads with the given status
    pub fn with_template_status(self, status: u16) -> Self {
        *self.template_status.write().unwrap() = Some(status);
        self
    }

    /// Answer document writes with the given status without storing them
    pub fn with_write_status(self, status: u16) -> Self {
        *self.write_status.write().unwrap() = Some(status);
        self
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.write().unwrap() = unreachable;
    }

    /// Change or clear the injected template upload status
    pub fn set_template_status(&self, status: Option<u16>) {
        *self.template_status.write().unwrap() = status;
    }

    /// Stored template body by name
    pub fn template(&self, name: &str) -> Option<Value> {
        self.templates.read().unwrap().get(name).cloned()
    }

    /// Stored document source by index and id
    pub fn document(&self, index: &str, id: &str) -> Option<Value> {
        self.indices
            .read()
            .unwrap()
            .get(index)
            .and_then(|docs| docs.get(id))
            .map(|doc| doc.source.clone())
    }

    pub fn document_version(&self, index: &str, id: &str) -> Option<u64> {
        self.indices
            .read()
            .unwrap()
            .get(index)
            .and_then(|docs| docs.get(id))
            .map(|doc| doc.version)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().unwrap().clone()
    }

    fn record(&self, method: &'static str, path: &str) -> Result<(), DomainError> {
        self.requests.write().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
        });

        if *self.unreachable.read().unwrap() {
            return Err(DomainError::transport("Connection refused"));
        }

        Ok(())
    }

    fn get_document(&self, index: &str, id: &str) -> StoreResponse {
        let indices = self.indices.read().unwrap();

        match indices.get(index).and_then(|docs| docs.get(id)) {
            Some(doc) => StoreResponse::json_body(
                200,
                &json!({
                    "_index": index,
                    "_type": "_doc",
                    "_id": id,
                    "_version": doc.version,
                    "_seq_no": doc.version - 1,
                    "_primary_term": 1,
                    "found": true,
                    "_source": doc.source,
                }),
            ),
            None => StoreResponse::json_body(
                404,
                &json!({"_index": index, "_type": "_doc", "_id": id, "found": false}),
            ),
        }
    }

    fn put_document(&self, index: &str, id: &str, body: &Value) -> StoreResponse {
        if let Some(status) = *self.write_status.read().unwrap() {
            return StoreResponse::json_body(
                status,
                &json!({"error": {"type": "simulated_failure"}, "status": status}),
            );
        }

        let mut indices = self.indices.write().unwrap();
        let docs = indices.entry(index.to_string()).or_default();

        let (version, result, status) = match docs.get(id) {
            Some(existing) => (existing.version + 1, "updated", 200),
            None => (1, "created", 201),
        };

        docs.insert(
            id.to_string(),
            StoredDocument {
                version,
                source: body.clone(),
            },
        );

        StoreResponse::json_body(
            status,
            &json!({
                "_index": index,
                "_type": "_doc",
                "_id": id,
                "_version": version,
                "result": result,
                "_shards": {"total": 2, "successful": 1, "failed": 0},
                "_seq_no": version - 1,
                "_primary_term": 1,
            }),
        )
    }

    fn put_template(&self, name: &str, body: &Value) -> StoreResponse {
        if let Some(status) = *self.template_status.read().unwrap() {
            return StoreResponse::json_body(
                status,
                &json!({"error": {"type": "simulated_failure"}, "status": status}),
            );
        }

        self.templates
            .write()
            .unwrap()
            .insert(name.to_string(), body.clone());

        StoreResponse::json_body(200, &json!({"acknowledged": true}))
    }

    /// Returns every document in the index; the query itself is not evaluated
    fn search(&self, index: &str) -> StoreResponse {
        let indices = self.indices.read().unwrap();

        let Some(docs) = indices.get(index) else {
            return StoreResponse::json_body(
                404,
                &json!({
                    "error": {"type": "index_not_found_exception", "index": index},
                    "status": 404
                }),
            );
        };

        let hits: Vec<Value> = docs
            .iter()
            .map(|(id, doc)| {
                json!({"_index": index, "_type": "_doc", "_id": id, "_score": 1.0, "_source": doc.source})
            })
            .collect();

        StoreResponse::json_body(
            200,
            &json!({
                "took": 1,
                "timed_out": false,
                "hits": {
                    "total": {"value": hits.len(), "relation": "eq"},
                    "max_score": 1.0,
                    "hits": hits
                }
            }),
        )
    }
}

fn not_handled(path: &str) -> StoreResponse {
    StoreResponse::json_body(
        400,
        &json!({"error": {"type": "illegal_argument_exception", "reason": path}, "status": 400}),
    )
}

#[async_trait]
impl ElasticClient for InMemoryElasticClient {
    async fn get(&self, path: &str) -> Result<StoreResponse, DomainError> {
        self.record("GET", path)?;

        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        Ok(match segments.as_slice() {
            [""] => StoreResponse::json_body(
                200,
                &json!({"name": "in-memory", "tagline": "You Know, for Search"}),
            ),
            [index, "_doc", id] => self.get_document(index, id),
            _ => not_handled(path),
        })
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<StoreResponse, DomainError> {
        self.record("PUT", path)?;

        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        Ok(match segments.as_slice() {
            ["_template", name] => self.put_template(name, body),
            [index, "_doc", id] => self.put_document(index, id, body),
            _ => not_handled(path),
        })
    }

    async fn post_json(&self, path: &str, _body: &Value) -> Result<StoreResponse, DomainError> {
        self.record("POST", path)?;

        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        Ok(match segments.as_slice() {
            [index, "_search"] => self.search(index),
            _ => not_handled(path),
        })
    }
}
