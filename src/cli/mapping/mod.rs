//! Mapping command - prints the index template synthesized for a model

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::domain::{make_model_template, Model};

/// Arguments for the mapping command
#[derive(Args, Clone, Debug)]
pub struct MappingArgs {
    /// Account the template is scoped to
    #[arg(long)]
    pub account: String,

    /// Path to a model definition in JSON
    pub model: PathBuf,
}

/// Print the template as pretty JSON on stdout
pub fn run(args: MappingArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.model)
        .with_context(|| format!("Failed to read {}", args.model.display()))?;

    println!("{}", render(&args.account, &raw)?);

    Ok(())
}

fn render(account: &str, raw: &str) -> anyhow::Result<String> {
    let mut model: Model = serde_json::from_str(raw).context("Invalid model definition")?;
    model.normalize_machine_name();

    let template = make_model_template(account, &model);
    Ok(serde_json::to_string_pretty(&template)?)
}
