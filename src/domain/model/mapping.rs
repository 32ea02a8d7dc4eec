//! Index template synthesis
//!
//! Derives store mappings from model field definitions. Everything here is
//! pure: the same model always yields the same template body, and the body
//! is uploaded with full-replace semantics.

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::Model;

/// Suffix appended to an account to form its models index
pub const MODELS_INDEX_SUFFIX: &str = "models";

/// Name of the baseline template covering every account's models index
pub const MODELS_TEMPLATE_NAME: &str = "models";

/// Field type used when a field has no or an unknown type class
pub const DEFAULT_FIELD_TYPE: &str = "keyword";

/// Store types passed through as `{"type": <type_class>}`
const SCALAR_TYPES: &[&str] = &[
    "keyword",
    "integer",
    "long",
    "short",
    "byte",
    "double",
    "float",
    "half_float",
    "scaled_float",
    "boolean",
    "ip",
    "geo_point",
    "binary",
];

/// Model document keys mapped by the baseline template. Account templates
/// never redefine them.
pub const DOCUMENT_PROPERTIES: &[&str] = &[
    "machine_name",
    "display_name",
    "description",
    "type_class",
    "format",
    "index",
    "fields",
    "metadata",
];

/// Index template document addressed by name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexTemplate {
    pub name: String,
    pub body: Value,
}

impl IndexTemplate {
    /// Store path for a full-replace upload of this template
    pub fn path(&self) -> String {
        format!("_template/{}", self.name)
    }
}

/// Models index for an account, e.g. `acme-models`
pub fn models_index(account: &str) -> String {
    format!("{}-{}", account, MODELS_INDEX_SUFFIX)
}

/// Baseline template describing the shape of model documents themselves
pub fn models_template() -> IndexTemplate {
    IndexTemplate {
        name: MODELS_TEMPLATE_NAME.to_string(),
        body: json!({
            "index_patterns": [format!("*-{}", MODELS_INDEX_SUFFIX)],
            "order": 0,
            "settings": {
                "number_of_shards": 1,
                "number_of_replicas": 0
            },
            "mappings": {
                "properties": {
                    "machine_name": {"type": "keyword"},
                    "display_name": {"type": "text"},
                    "description": {"type": "text"},
                    "type_class": {"type": "keyword"},
                    "format": {"type": "keyword"},
                    "index": {"type": "boolean"},
                    "fields": {"type": "object", "enabled": false},
                    "metadata": {"type": "object", "enabled": false}
                }
            }
        }),
    }
}

/// Template for an account's models index derived from `model`'s fields.
///
/// Regenerated on every write; the previous template for the account is
/// replaced, not merged. Top-level fields named like a model document key
/// (see [`DOCUMENT_PROPERTIES`]) are left out so the baseline mapping for
/// that key stays in force.
pub fn make_model_template(account: &str, model: &Model) -> IndexTemplate {
    let index = models_index(account);
    let fields: Vec<Model> = model
        .fields()
        .iter()
        .filter(|field| !DOCUMENT_PROPERTIES.contains(&field.machine_name()))
        .cloned()
        .collect();

    IndexTemplate {
        name: index.clone(),
        body: json!({
            "index_patterns": [format!("{}*", index)],
            "order": 1,
            "mappings": {
                "properties": make_properties(&fields)
            }
        }),
    }
}

/// Map each field definition to a store property, keyed by machine name
pub fn make_properties(fields: &[Model]) -> Value {
    let mut properties = Map::new();

    for field in fields {
        properties.insert(field.machine_name().to_string(), make_property(field));
    }

    Value::Object(properties)
}

fn make_property(field: &Model) -> Value {
    let type_class = field
        .type_class()
        .map(|t| t.trim().to_lowercase())
        .unwrap_or_default();

    let mut property = Map::new();

    match type_class.as_str() {
        "text" => {
            property.insert("type".into(), json!("text"));
            property.insert(
                "fields".into(),
                json!({"keyword": {"type": "keyword", "ignore_above": 256}}),
            );
        }
        "date" => {
            property.insert("type".into(), json!("date"));
            if let Some(format) = field.format() {
                property.insert("format".into(), json!(format));
            }
        }
        "object" | "nested" => {
            property.insert("type".into(), json!(type_class));
            property.insert("properties".into(), make_properties(field.fields()));
        }
        t if SCALAR_TYPES.contains(&t) => {
            property.insert("type".into(), json!(t));
        }
        _ => {
            property.insert("type".into(), json!(DEFAULT_FIELD_TYPE));
        }
    }

    if field.index() == Some(false) {
        property.insert("index".into(), json!(false));
    }

    Value::Object(property)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Model {
        Model::new("customer")
            .with_field(Model::field("name", "text"))
            .with_field(Model::field("age", "integer"))
            .with_field(Model::field("joined", "date").with_format("yyyy-MM-dd"))
            .with_field(
                Model::field("address", "object")
                    .with_field(Model::field("city", "keyword"))
                    .with_field(Model::field("location", "geo_point")),
            )
    }

    #[test]
    fn test_models_index() {
        assert_eq!(models_index("acme"), "acme-models");
    }

    #[test]
    fn test_template_is_scoped_to_account() {
        let template = make_model_template("acme", &customer());

        assert_eq!(template.name, "acme-models");
        assert_eq!(template.path(), "_template/acme-models");
        assert_eq!(template.body["index_patterns"], json!(["acme-models*"]));
        assert_eq!(template.body["order"], json!(1));
    }

    #[test]
    fn test_field_type_mapping() {
        let template = make_model_template("acme", &customer());
        let props = &template.body["mappings"]["properties"];

        assert_eq!(props["name"]["type"], json!("text"));
        assert_eq!(
            props["name"]["fields"]["keyword"],
            json!({"type": "keyword", "ignore_above": 256})
        );
        assert_eq!(props["age"], json!({"type": "integer"}));
        assert_eq!(props["joined"], json!({"type": "date", "format": "yyyy-MM-dd"}));
        assert_eq!(props["address"]["type"], json!("object"));
        assert_eq!(
            props["address"]["properties"]["city"],
            json!({"type": "keyword"})
        );
        assert_eq!(
            props["address"]["properties"]["location"],
            json!({"type": "geo_point"})
        );
    }

    #[test]
    fn test_unknown_and_missing_types_fall_back_to_keyword() {
        let model = Model::new("thing")
            .with_field(Model::field("weird", "hologram"))
            .with_field(Model::new("untyped"));

        let props = make_properties(model.fields());

        assert_eq!(props["weird"], json!({"type": "keyword"}));
        assert_eq!(props["untyped"], json!({"type": "keyword"}));
    }

    #[test]
    fn test_type_class_is_case_insensitive() {
        let props = make_properties(&[Model::field("flag", " Boolean ")]);
        assert_eq!(props["flag"], json!({"type": "boolean"}));
    }

    #[test]
    fn test_index_hint() {
        let props = make_properties(&[Model::field("blob", "binary").with_index(false)]);
        assert_eq!(props["blob"], json!({"type": "binary", "index": false}));
    }

    #[test]
    fn test_nested_without_fields_has_empty_properties() {
        let props = make_properties(&[Model::field("tags", "nested")]);
        assert_eq!(props["tags"], json!({"type": "nested", "properties": {}}));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let first = make_model_template("acme", &customer());
        let second = make_model_template("acme", &customer());

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first.body).unwrap(),
            serde_json::to_string(&second.body).unwrap()
        );
    }

    #[test]
    fn test_template_reflects_only_current_fields() {
        let v1 = Model::new("customer").with_field(Model::field("legacy", "keyword"));
        let v2 = Model::new("customer").with_field(Model::field("name", "text"));

        let template = make_model_template("acme", &v2);
        let props = &template.body["mappings"]["properties"];

        assert!(make_model_template("acme", &v1).body["mappings"]["properties"]
            .get("legacy")
            .is_some());
        assert!(props.get("legacy").is_none());
        assert!(props.get("name").is_some());
    }

    #[test]
    fn test_document_keys_are_not_redefined() {
        let model = Model::new("customer")
            .with_field(Model::field("description", "integer"))
            .with_field(Model::field("fields", "keyword"))
            .with_field(Model::field("name", "text"))
            .with_field(
                Model::field("address", "object").with_field(Model::field("description", "text")),
            );

        let template = make_model_template("acme", &model);
        let props = &template.body["mappings"]["properties"];

        assert!(props.get("description").is_none());
        assert!(props.get("fields").is_none());
        assert!(props.get("name").is_some());
        assert_eq!(
            props["address"]["properties"]["description"]["type"],
            json!("text")
        );
    }

    #[test]
    fn test_document_properties_match_baseline() {
        let baseline = models_template();
        let mut keys: Vec<&str> = baseline.body["mappings"]["properties"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut expected = DOCUMENT_PROPERTIES.to_vec();
        keys.sort_unstable();
        expected.sort_unstable();

        assert_eq!(keys, expected);
    }

    #[test]
    fn test_models_template() {
        let template = models_template();

        assert_eq!(template.name, "models");
        assert_eq!(template.path(), "_template/models");
        assert_eq!(template.body["index_patterns"], json!(["*-models"]));
        assert_eq!(
            template.body["mappings"]["properties"]["machine_name"],
            json!({"type": "keyword"})
        );
    }
}
