//! Model entity and store envelopes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type model: a tenant-owned schema definition.
///
/// A model's fields are themselves models, so a definition forms a tree.
/// Only `machine_name` is required on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Identifier unique within an account
    machine_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    display_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    /// Store field type used when this model is a field of another model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    type_class: Option<String>,

    /// Store format hint, e.g. a date pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,

    /// Indexing hint; `Some(false)` stores the field without indexing it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fields: Vec<Model>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    metadata: Map<String, Value>,
}

impl Model {
    pub fn new(machine_name: impl Into<String>) -> Self {
        Self {
            machine_name: machine_name.into(),
            display_name: String::new(),
            description: None,
            type_class: None,
            format: None,
            index: None,
            fields: Vec::new(),
            metadata: Map::new(),
        }
    }

    /// Create a field definition of the given store type
    pub fn field(machine_name: impl Into<String>, type_class: impl Into<String>) -> Self {
        Self::new(machine_name).with_type_class(type_class)
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type_class(mut self, type_class: impl Into<String>) -> Self {
        self.type_class = Some(type_class.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_index(mut self, index: bool) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_field(mut self, field: Model) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields(mut self, fields: Vec<Model>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    // Getters

    pub fn machine_name(&self) -> &str {
        &self.machine_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn type_class(&self) -> Option<&str> {
        self.type_class.as_deref()
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn index(&self) -> Option<bool> {
        self.index
    }

    pub fn fields(&self) -> &[Model] {
        &self.fields
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Lowercase the top-level machine name. Nested field names are untouched.
    pub fn normalize_machine_name(&mut self) {
        self.machine_name = self.machine_name.to_lowercase();
    }
}

/// Read envelope returned by the store for a single model document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    #[serde(rename = "_index", default)]
    pub index: String,

    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(rename = "_version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    #[serde(rename = "_seq_no", default, skip_serializing_if = "Option::is_none")]
    pub seq_no: Option<u64>,

    #[serde(rename = "_primary_term", default, skip_serializing_if = "Option::is_none")]
    pub primary_term: Option<u64>,

    #[serde(default)]
    pub found: bool,

    #[serde(rename = "_source")]
    pub source: Model,
}

/// Shard summary attached to store write results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShardInfo {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub successful: u32,
    #[serde(default)]
    pub failed: u32,
}

/// Write envelope returned by the store for a document PUT
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexResult {
    #[serde(rename = "_index", default)]
    pub index: String,

    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(rename = "_version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    /// `created` or `updated`
    #[serde(default)]
    pub result: String,

    #[serde(rename = "_shards", default)]
    pub shards: ShardInfo,

    #[serde(rename = "_seq_no", default, skip_serializing_if = "Option::is_none")]
    pub seq_no: Option<u64>,

    #[serde(rename = "_primary_term", default, skip_serializing_if = "Option::is_none")]
    pub primary_term: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_builder() {
        let model = Model::new("Customer")
            .with_display_name("Customer")
            .with_description("A paying customer")
            .with_field(Model::field("name", "text"))
            .with_field(Model::field("age", "integer").with_index(false))
            .with_metadata("owner", json!("sales"));

        assert_eq!(model.machine_name(), "Customer");
        assert_eq!(model.display_name(), "Customer");
        assert_eq!(model.description(), Some("A paying customer"));
        assert_eq!(model.fields().len(), 2);
        assert_eq!(model.fields()[0].type_class(), Some("text"));
        assert_eq!(model.fields()[1].index(), Some(false));
        assert_eq!(model.metadata().get("owner"), Some(&json!("sales")));
    }

    #[test]
    fn test_normalize_only_touches_top_level() {
        let mut model = Model::new("Customer").with_field(Model::field("FirstName", "text"));
        model.normalize_machine_name();

        assert_eq!(model.machine_name(), "customer");
        assert_eq!(model.fields()[0].machine_name(), "FirstName");
    }

    #[test]
    fn test_model_deserialize_minimal() {
        let model: Model = serde_json::from_value(json!({"machine_name": "device"})).unwrap();

        assert_eq!(model.machine_name(), "device");
        assert!(model.fields().is_empty());
        assert!(model.metadata().is_empty());
    }

    #[test]
    fn test_model_serialization_skips_empty() {
        let json = serde_json::to_value(Model::new("device")).unwrap();
        assert_eq!(json, json!({"machine_name": "device"}));
    }

    #[test]
    fn test_model_result_from_store_envelope() {
        let body = json!({
            "_index": "acme-models",
            "_type": "_doc",
            "_id": "customer",
            "_version": 3,
            "_seq_no": 7,
            "_primary_term": 1,
            "found": true,
            "_source": {
                "machine_name": "customer",
                "fields": [{"machine_name": "name", "type_class": "text"}]
            }
        });

        let result: ModelResult = serde_json::from_value(body).unwrap();

        assert_eq!(result.index, "acme-models");
        assert_eq!(result.id, "customer");
        assert_eq!(result.version, Some(3));
        assert!(result.found);
        assert_eq!(result.source.machine_name(), "customer");
        assert_eq!(result.source.fields()[0].type_class(), Some("text"));
    }

    #[test]
    fn test_index_result_from_store_envelope() {
        let body = json!({
            "_index": "acme-models",
            "_id": "customer",
            "_version": 1,
            "result": "created",
            "_shards": {"total": 2, "successful": 1, "failed": 0},
            "_seq_no": 0,
            "_primary_term": 1
        });

        let result: IndexResult = serde_json::from_value(body).unwrap();

        assert_eq!(result.result, "created");
        assert_eq!(result.shards.successful, 1);
        assert_eq!(result.doc_type, None);
    }
}
