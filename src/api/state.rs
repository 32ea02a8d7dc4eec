//! Application state for shared services

use std::sync::Arc;

use crate::config::Mode;
use crate::domain::ModelRepository;
use crate::infrastructure::elastic::ElasticClient;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub model_repository: Arc<dyn ModelRepository>,
    /// Raw store access, used by readiness checks
    pub store: Arc<dyn ElasticClient>,
    pub mode: Mode,
}

impl AppState {
    pub fn new(
        model_repository: Arc<dyn ModelRepository>,
        store: Arc<dyn ElasticClient>,
        mode: Mode,
    ) -> Self {
        Self {
            model_repository,
            store,
            mode,
        }
    }
}
