//! Elasticsearch store access

pub mod bootstrap;
pub mod client;
pub mod in_memory;

pub use bootstrap::{
    bootstrap, wait_for_store, BootstrapConfig, ProbeOutcome, Sleeper, TokioSleeper,
    DEFAULT_BACKOFF_SECS,
};
#[cfg(test)]
pub use client::MockElasticClient;
pub use client::{send_template, ElasticClient, ElasticHttpClient, StoreResponse};
pub use in_memory::{InMemoryElasticClient, RecordedRequest};
