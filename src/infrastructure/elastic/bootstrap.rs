//! Store bootstrap
//!
//! Waits for the store to answer, then publishes the baseline models
//! template. Probing never fails initialization; the template upload does.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{error, info, warn};

use super::client::{send_template, ElasticClient};
use crate::domain::{models_template, DomainError};

/// Default wait, in seconds, after each failed probe
pub const DEFAULT_BACKOFF_SECS: [u64; 7] = [10, 10, 15, 15, 30, 30, 45];

/// Bootstrap parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapConfig {
    /// One probe per entry; the entry is the wait after that probe fails
    pub backoff: Vec<Duration>,
    /// Upper bound on the probe phase; `None` waits out the whole sequence
    pub deadline: Option<Duration>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            backoff: DEFAULT_BACKOFF_SECS
                .iter()
                .map(|secs| Duration::from_secs(*secs))
                .collect(),
            deadline: None,
        }
    }
}

impl BootstrapConfig {
    pub fn from_secs(backoff: &[u64], deadline: Option<u64>) -> Self {
        Self {
            backoff: backoff.iter().map(|secs| Duration::from_secs(*secs)).collect(),
            deadline: deadline.map(Duration::from_secs),
        }
    }
}

/// Wait primitive used between probes
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// How the probe phase ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Store answered with a 2xx on the given attempt (1-based)
    Reachable { attempt: usize },
    /// Every attempt failed
    Exhausted { attempts: usize },
    /// Deadline elapsed after the given number of attempts
    DeadlineExceeded { attempts: usize },
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable { .. })
    }
}

/// Probe the store root until it answers with a 2xx or the backoff runs out
pub async fn wait_for_store(
    client: &dyn ElasticClient,
    config: &BootstrapConfig,
    sleeper: &dyn Sleeper,
) -> ProbeOutcome {
    let deadline = config.deadline.map(|d| Instant::now() + d);
    let mut attempts = 0;

    for wait in &config.backoff {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            warn!(attempts, "Store probe deadline exceeded");
            return ProbeOutcome::DeadlineExceeded { attempts };
        }

        attempts += 1;
        info!(attempt = attempts, "Attempting to contact Elasticsearch");

        match client.get("").await {
            Ok(response) if response.is_success() => {
                info!(attempt = attempts, "Connection to Elasticsearch successful");
                return ProbeOutcome::Reachable { attempt: attempts };
            }
            Ok(response) => {
                warn!(
                    status = response.status,
                    wait_seconds = wait.as_secs(),
                    "Elasticsearch not ready, backing off"
                );
            }
            Err(e) => {
                warn!(
                    error = %e,
                    wait_seconds = wait.as_secs(),
                    "Unable to contact Elasticsearch, backing off"
                );
            }
        }

        let wait = match deadline {
            Some(d) => (*wait).min(d.saturating_duration_since(Instant::now())),
            None => *wait,
        };
        sleeper.sleep(wait).await;
    }

    warn!(attempts, "Elasticsearch probes exhausted, continuing");
    ProbeOutcome::Exhausted { attempts }
}

/// Run the full bootstrap: probe, then upload the baseline models template.
///
/// Returns `DomainError::Initialization` when the template upload fails;
/// the service must not start serving in that case.
pub async fn bootstrap(
    client: &dyn ElasticClient,
    config: &BootstrapConfig,
    sleeper: &dyn Sleeper,
) -> Result<ProbeOutcome, DomainError> {
    let outcome = wait_for_store(client, config, sleeper).await;

    let template = models_template();
    let response = send_template(client, &template).await.map_err(|e| {
        error!(error = %e, "Failed to send models template");
        DomainError::initialization(format!("Failed to send models template: {}", e))
    })?;

    if !response.is_success() {
        error!(status = response.status, "Store rejected models template");
        return Err(DomainError::initialization(format!(
            "Store rejected models template with HTTP {}",
            response.status
        )));
    }

    info!(template = %template.name, "Models template installed");
    Ok(outcome)
}
