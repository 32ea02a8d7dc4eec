//! Model domain - type model definitions, mapping synthesis and persistence contract

mod entity;
pub mod mapping;
mod repository;
mod validation;

pub use entity::{IndexResult, Model, ModelResult, ShardInfo};
pub use mapping::{make_model_template, models_index, models_template, IndexTemplate};
pub use repository::{ModelRepository, ReadIdPolicy, SearchResults};
pub use validation::{validate_account, validate_machine_name, SegmentValidationError};
