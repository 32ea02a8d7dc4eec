//! Model service - account-scoped model persistence over the store

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info};

use crate::domain::{
    make_model_template, models_index, validate_account, validate_machine_name, DomainError,
    IndexResult, Model, ModelRepository, ModelResult, ReadIdPolicy, SearchResults,
};
use crate::infrastructure::elastic::{send_template, ElasticClient};

/// Model service settings, fixed at construction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelServiceConfig {
    pub read_id_policy: ReadIdPolicy,
}

/// Model service backed by an Elasticsearch-compatible store
pub struct ModelService {
    client: Arc<dyn ElasticClient>,
    config: ModelServiceConfig,
}

impl std::fmt::Debug for ModelService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ModelService {
    /// Create a new ModelService with the given client and settings
    pub fn new(client: Arc<dyn ElasticClient>, config: ModelServiceConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ModelServiceConfig {
        &self.config
    }

    fn document_path(account: &str, id: &str) -> String {
        format!("{}/_doc/{}", models_index(account), id)
    }

    /// Synthesize the account template for `model` and upload it
    async fn sync_mapping(&self, account: &str, model: &Model) -> Result<(), DomainError> {
        let template = make_model_template(account, model);

        let response = send_template(self.client.as_ref(), &template)
            .await
            .map_err(|e| DomainError::mapping(format!("Failed to send template: {}", e)))?;

        if !response.is_success() {
            return Err(DomainError::mapping(format!(
                "Store rejected template '{}' with HTTP {}",
                template.name, response.status
            )));
        }

        Ok(())
    }
}

fn check_segments(account: &str, id: &str) -> Result<(), DomainError> {
    validate_account(account).map_err(|e| DomainError::validation(e.to_string()))?;
    validate_machine_name(id).map_err(|e| DomainError::validation(e.to_string()))
}

#[async_trait]
impl ModelRepository for ModelService {
    async fn get_model(&self, account: &str, id: &str) -> Result<ModelResult, DomainError> {
        let id = self.config.read_id_policy.apply(id);
        check_segments(account, &id)?;

        let response = self
            .client
            .get(&Self::document_path(account, &id))
            .await
            .inspect_err(|e| error!(error = %e, account, id = %id, "EsError"))?;

        if response.is_client_error() {
            return Err(DomainError::not_found(format!("Model {} not found.", id)));
        }

        if !response.is_success() {
            return Err(DomainError::store_with_body(
                response.status,
                "Es returned a non 200",
                response.json_value(),
            ));
        }

        response.json()
    }

    async fn upsert_model(
        &self,
        account: &str,
        mut model: Model,
    ) -> Result<IndexResult, DomainError> {
        model.normalize_machine_name();
        check_segments(account, model.machine_name())?;

        info!(
            account,
            machine_name = model.machine_name(),
            "Upsert model record"
        );

        self.sync_mapping(account, &model)
            .await
            .inspect_err(|e| error!(error = %e, account, "Template sync failed"))?;

        let body = serde_json::to_value(&model)?;
        let response = self
            .client
            .put_json(&Self::document_path(account, model.machine_name()), &body)
            .await?;

        if !response.is_success() {
            error!(status = response.status, "Es returned a non 200");
            return Err(DomainError::store_with_body(
                response.status,
                "Es returned a non 200",
                response.json_value(),
            ));
        }

        response.json()
    }

    async fn search_models(
        &self,
        account: &str,
        query: &Value,
    ) -> Result<SearchResults, DomainError> {
        validate_account(account).map_err(|e| DomainError::validation(e.to_string()))?;

        let response = self
            .client
            .post_json(&format!("{}/_search", models_index(account)), query)
            .await?;

        Ok(SearchResults {
            status: response.status,
            body: response.json_value(),
        })
    }
}
