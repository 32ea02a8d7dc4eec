use serde::Deserialize;

use crate::domain::ReadIdPolicy;
use crate::infrastructure::elastic::{BootstrapConfig, DEFAULT_BACKOFF_SECS};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub elastic: ElasticConfig,
    pub models: ModelsConfig,
    pub mode: Mode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Store connection and bootstrap settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElasticConfig {
    pub server: String,
    pub timeout_secs: u64,
    /// Wait after each failed startup probe, in seconds
    pub backoff_secs: Vec<u64>,
    /// Bound on the whole startup probe phase
    pub bootstrap_deadline_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub read_id_policy: ReadIdPolicy,
}

/// Access mode. `Internal` skips the access check entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Protected,
    Internal,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Protected => write!(f, "protected"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ElasticConfig {
    fn default() -> Self {
        Self {
            server: "http://elasticsearch:9200".to_string(),
            timeout_secs: 30,
            backoff_secs: DEFAULT_BACKOFF_SECS.to_vec(),
            bootstrap_deadline_secs: None,
        }
    }
}

impl ElasticConfig {
    pub fn bootstrap(&self) -> BootstrapConfig {
        BootstrapConfig::from_secs(&self.backoff_secs, self.bootstrap_deadline_secs)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("elastic.backoff_secs")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
