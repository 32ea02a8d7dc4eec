//! Elasticsearch HTTP client

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use crate::domain::{DomainError, IndexTemplate};

/// Raw store response: status code plus unparsed body
#[derive(Debug, Clone, PartialEq)]
pub struct StoreResponse {
    pub status: u16,
    pub body: Bytes,
}

impl StoreResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Response with a JSON body
    pub fn json_body(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Status in [200, 300)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Status in [400, 500)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Deserialize the body
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, DomainError> {
        serde_json::from_slice(&self.body).map_err(|e| {
            DomainError::serialization(format!("Failed to parse store response: {}", e))
        })
    }

    /// Body as JSON, or as a JSON string when it is not valid JSON
    pub fn json_value(&self) -> Value {
        if self.body.is_empty() {
            return Value::Null;
        }

        serde_json::from_slice(&self.body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&self.body).into_owned()))
    }
}

/// Trait for store operations (for mocking)
///
/// Paths are relative to the configured server, e.g. `acme-models/_doc/customer`.
/// Non-2xx statuses are returned as responses; only transport failures are errors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ElasticClient: Send + Sync {
    async fn get(&self, path: &str) -> Result<StoreResponse, DomainError>;

    async fn put_json(&self, path: &str, body: &Value) -> Result<StoreResponse, DomainError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<StoreResponse, DomainError>;
}

/// Upload an index template with full-replace semantics
pub async fn send_template(
    client: &dyn ElasticClient,
    template: &IndexTemplate,
) -> Result<StoreResponse, DomainError> {
    debug!(template = %template.name, "Sending index template");
    client.put_json(&template.path(), &template.body).await
}

/// Real store client using reqwest
#[derive(Debug, Clone)]
pub struct ElasticHttpClient {
    client: reqwest::Client,
    server: String,
}

impl ElasticHttpClient {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            server: normalize_server(server.into()),
        }
    }

    pub fn with_timeout(
        server: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            server: normalize_server(server.into()),
        })
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.server, path.trim_start_matches('/'))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<StoreResponse, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("Request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::transport(format!("Failed to read response: {}", e)))?;

        Ok(StoreResponse { status, body })
    }
}

fn normalize_server(server: String) -> String {
    server.trim_end_matches('/').to_string()
}

#[async_trait]
impl ElasticClient for ElasticHttpClient {
    async fn get(&self, path: &str) -> Result<StoreResponse, DomainError> {
        self.send(self.client.get(self.url(path))).await
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<StoreResponse, DomainError> {
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<StoreResponse, DomainError> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }
}
