//! Type Model service
//!
//! Tenant-scoped schema definitions ("type models") stored in an
//! Elasticsearch-compatible document store:
//! - Store bootstrap with probe backoff and a baseline models template
//! - Per-account index template synthesis on every write
//! - Get/upsert/search over `{account}-models`

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::elastic::{bootstrap, ElasticClient, ElasticHttpClient, Sleeper, TokioSleeper};
use infrastructure::services::{ModelService, ModelServiceConfig};
use tracing::info;

/// Create the application state, bootstrapping the configured store
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let client = ElasticHttpClient::with_timeout(&config.elastic.server, config.elastic.timeout())?;
    info!(server = %client.server(), "Using Elasticsearch");

    create_app_state_with_client(config, Arc::new(client), &TokioSleeper).await
}

/// Create the application state over an existing store client.
///
/// Fails, and no state is built, when the baseline models template cannot
/// be installed.
pub async fn create_app_state_with_client(
    config: &AppConfig,
    client: Arc<dyn ElasticClient>,
    sleeper: &dyn Sleeper,
) -> anyhow::Result<AppState> {
    let outcome = bootstrap(client.as_ref(), &config.elastic.bootstrap(), sleeper).await?;
    info!(outcome = ?outcome, "Store bootstrap complete");

    let model_service = ModelService::new(
        client.clone(),
        ModelServiceConfig {
            read_id_policy: config.models.read_id_policy,
        },
    );

    Ok(AppState::new(Arc::new(model_service), client, config.mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::infrastructure::elastic::InMemoryElasticClient;
    use std::time::Duration;

    struct NoSleep;

    #[async_trait::async_trait]
    impl Sleeper for NoSleep {
        async fn sleep(&self, _duration: Duration) {}
    }

    #[tokio::test]
    async fn test_state_is_built_after_bootstrap() {
        let store = Arc::new(InMemoryElasticClient::new());

        let state = create_app_state_with_client(&AppConfig::default(), store.clone(), &NoSleep)
            .await
            .unwrap();

        assert!(store.template("models").is_some());
        assert_eq!(state.mode, crate::config::Mode::Protected);
    }

    #[tokio::test]
    async fn test_fatal_init_builds_no_state() {
        let store = Arc::new(InMemoryElasticClient::new().with_template_status(500));

        let result = create_app_state_with_client(&AppConfig::default(), store, &NoSleep).await;

        let err = result.err().expect("bootstrap should fail");
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Initialization { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_store_still_attempts_template() {
        let store = Arc::new(InMemoryElasticClient::new().unreachable());

        let result =
            create_app_state_with_client(&AppConfig::default(), store.clone(), &NoSleep).await;

        assert!(result.is_err());
        let requests = store.requests();
        assert_eq!(requests.len(), 8);
        assert_eq!(requests[7].path, "_template/models");
    }
}
