//! `manifest`: crystallize one intent.
//!
//! ```bash
//! intent-oracle manifest "where does the river end"
//! intent-oracle manifest --offline --seed 7 --json "quiet harbor"
//! ```

use std::sync::Arc;

use clap::Args;
use intent_oracle_core::{artifact, Oracle, OracleConfig};
use tracing::debug;

use super::{ArtifactArgs, EntropyArgs};
use crate::error::CliError;

#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Intent text
    pub intent: String,

    #[command(flatten)]
    pub artifact: ArtifactArgs,

    #[command(flatten)]
    pub entropy: EntropyArgs,

    /// Print the full manifestation as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn handle_manifest(args: ManifestArgs, mut config: OracleConfig) -> Result<(), CliError> {
    args.artifact.apply(&mut config);
    args.entropy.apply(&mut config);

    let table = Arc::new(artifact::load_from_config(&config.artifact)?);
    let entropy = args.entropy.build(&config);
    debug!(primary = ?entropy.primary_name(), "Entropy configured");

    let oracle = Oracle::with_entropy(table, entropy, &config);
    let manifestation = oracle.manifest(&args.intent).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&manifestation)?);
    } else {
        println!("{}", manifestation.crystal);
    }
    Ok(())
}
