//! Serve command - bootstraps the store, then runs the model API

use std::net::SocketAddr;

use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::api::create_router_with_state;
use crate::config::{AppConfig, Mode};
use crate::infrastructure::logging;

/// Flags overriding the layered configuration
#[derive(Args, Clone, Debug, Default)]
pub struct ServeArgs {
    /// Access mode (internal = access check bypass)
    #[arg(long, env = "MODE", value_enum, global = true)]
    pub mode: Option<Mode>,

    /// Elasticsearch server URL
    #[arg(long, env = "ELASTIC_SERVER", global = true)]
    pub es_server: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long, global = true)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Apply flag and environment overrides to the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }

        if let Some(server) = &self.es_server {
            config.elastic.server = server.clone();
        }

        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Run the API server
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    args.apply(&mut config);

    logging::init_logging(&config.logging);
    info!(mode = %config.mode, "Mode status");

    let state = crate::create_app_state_with_config(&config)
        .await
        .inspect_err(|e| error!(error = %e, "Failure to instantiate the model API"))?;
    let app = create_router_with_state(state);

    let addr = build_socket_addr(&config)?;
    info!("Starting Type Model server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let mut config = AppConfig::default();
        let args = ServeArgs {
            mode: Some(Mode::Internal),
            es_server: Some("http://localhost:9200".to_string()),
            port: Some(9000),
        };

        args.apply(&mut config);

        assert_eq!(config.mode, Mode::Internal);
        assert_eq!(config.elastic.server, "http://localhost:9200");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_apply_without_overrides_keeps_config() {
        let mut config = AppConfig::default();
        ServeArgs::default().apply(&mut config);

        assert_eq!(config.mode, Mode::Protected);
        assert_eq!(config.elastic.server, "http://elasticsearch:9200");
    }

    #[test]
    fn test_build_socket_addr() {
        let addr = build_socket_addr(&AppConfig::default()).unwrap();
        assert_eq!(addr.port(), 8080);
    }
}
