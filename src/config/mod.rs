//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, ElasticConfig, LogFormat, LoggingConfig, ModelsConfig, Mode, ServerConfig,
};
