use clap::Parser;
use type_model_service::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Mapping(args)) => cli::mapping::run(args),
        Some(Command::Serve) | None => cli::serve::run(cli.serve).await,
    }
}
