//! `inspect`: load the embedding artifact and describe it.

use clap::Args;
use intent_oracle_core::{artifact, OracleConfig};
use serde_json::json;

use super::ArtifactArgs;
use crate::error::CliError;

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub artifact: ArtifactArgs,

    /// Number of leading words to list
    #[arg(long, default_value = "10")]
    pub sample: usize,
}

pub async fn handle_inspect(args: InspectArgs, mut config: OracleConfig) -> Result<(), CliError> {
    args.artifact.apply(&mut config);
    let table = artifact::load_from_config(&config.artifact)?;

    let sample: Vec<&str> = table.words().iter().take(args.sample).map(String::as_str).collect();
    let out = json!({
        "path": config.artifact.path,
        "words": table.len(),
        "dimension": table.dimension(),
        "sample": sample,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
