//! CLI module for the Type Model service
//!
//! - `serve`: bootstrap the store and run the HTTP API (default)
//! - `mapping`: print the index template synthesized for a model file

pub mod mapping;
pub mod serve;

use clap::{Parser, Subcommand};

/// Type Model (tm) - tenant-scoped schema definitions over Elasticsearch
#[derive(Parser)]
#[command(name = "tm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub serve: serve::ServeArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Bootstrap the store and serve the model API
    Serve,

    /// Print the index template a model would produce
    Mapping(mapping::MappingArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["tm"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.serve.port, None);
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "tm",
            "serve",
            "--mode",
            "internal",
            "--es-server",
            "http://localhost:9200",
        ])
        .unwrap();

        assert!(matches!(cli.command, Some(Command::Serve)));
        assert_eq!(cli.serve.mode, Some(Mode::Internal));
        assert_eq!(cli.serve.es_server.as_deref(), Some("http://localhost:9200"));
    }

    #[test]
    fn test_flags_without_subcommand() {
        let cli = Cli::try_parse_from(["tm", "--mode", "protected", "--port", "9000"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.serve.mode, Some(Mode::Protected));
        assert_eq!(cli.serve.port, Some(9000));
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        assert!(Cli::try_parse_from(["tm", "serve", "--mode", "open"]).is_err());
    }

    #[test]
    fn test_mapping_args() {
        let cli =
            Cli::try_parse_from(["tm", "mapping", "--account", "acme", "model.json"]).unwrap();

        match cli.command {
            Some(Command::Mapping(args)) => {
                assert_eq!(args.account, "acme");
                assert_eq!(args.model.to_str(), Some("model.json"));
            }
            _ => panic!("expected mapping"),
        }
    }
}
