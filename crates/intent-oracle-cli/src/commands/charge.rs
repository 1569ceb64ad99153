//! `charge`: print the charge vector for an intent without crystallizing.

use clap::Args;
use intent_oracle_core::{ChargeVectorSynthesizer, OracleConfig};
use serde_json::json;

use super::EntropyArgs;
use crate::error::CliError;

#[derive(Args, Debug)]
pub struct ChargeArgs {
    /// Intent text (may be empty)
    pub intent: String,

    /// Vector dimension
    #[arg(long)]
    pub dim: usize,

    #[command(flatten)]
    pub entropy: EntropyArgs,
}

pub async fn handle_charge(args: ChargeArgs, mut config: OracleConfig) -> Result<(), CliError> {
    if args.dim == 0 {
        return Err(CliError::InvalidArgument("--dim must be greater than 0".into()));
    }
    if let Some(bytes) = &args.entropy.bytes {
        if bytes.len() != args.dim {
            return Err(CliError::InvalidArgument(format!(
                "--bytes has {} values but --dim is {}",
                bytes.len(),
                args.dim
            )));
        }
    }
    args.entropy.apply(&mut config);

    let synthesizer = ChargeVectorSynthesizer::new(args.entropy.build(&config), config.synthesis.clone());
    let charge = synthesizer.synthesize(&args.intent, args.dim).await?;

    let out = json!({
        "intent": args.intent,
        "dimension": args.dim,
        "entropy_origin": charge.origin,
        "entropy_source": charge.source,
        "stats": charge.stats,
        "norm": charge.vector.norm(),
        "vector": charge.vector,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
