//! Domain layer - Core business logic and entities

pub mod error;
pub mod model;

pub use error::DomainError;
pub use model::{
    make_model_template, models_index, models_template, validate_account,
    validate_machine_name, IndexResult, IndexTemplate, Model, ModelRepository, ModelResult,
    ReadIdPolicy, SearchResults, SegmentValidationError,
};
