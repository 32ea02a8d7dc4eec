//! Model repository trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{IndexResult, Model, ModelResult};
use crate::domain::DomainError;

/// How the id supplied to a read is turned into a document key.
///
/// Writes always lowercase the machine name. With `Verbatim` a read for
/// `"Foo"` does not find a model written as `"Foo"`, since it was stored
/// under `"foo"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadIdPolicy {
    /// Use the id exactly as supplied
    #[default]
    Verbatim,
    /// Lowercase the id, matching the write path
    Lowercase,
}

impl ReadIdPolicy {
    pub fn apply<'a>(&self, id: &'a str) -> std::borrow::Cow<'a, str> {
        match self {
            Self::Verbatim => std::borrow::Cow::Borrowed(id),
            Self::Lowercase => std::borrow::Cow::Owned(id.to_lowercase()),
        }
    }
}

/// Store search response, passed through unmodified
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub status: u16,
    pub body: Value,
}

/// Repository trait for type models
#[async_trait]
pub trait ModelRepository: Send + Sync {
    /// Get a model by id within an account
    async fn get_model(&self, account: &str, id: &str) -> Result<ModelResult, DomainError>;

    /// Create or fully replace a model, syncing the account's index template first
    async fn upsert_model(&self, account: &str, model: Model) -> Result<IndexResult, DomainError>;

    /// Forward a query to the account's models index
    async fn search_models(&self, account: &str, query: &Value)
        -> Result<SearchResults, DomainError>;
}
