//! CLI command handlers
//!
//! # Modules
//!
//! - `manifest`: run the full pipeline for one intent
//! - `charge`: print the synthesized charge vector
//! - `inspect`: describe the configured embedding artifact

pub mod charge;
pub mod inspect;
pub mod manifest;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use intent_oracle_core::entropy::StaticEntropy;
use intent_oracle_core::{GuardedEntropy, LocalEntropy, OracleConfig};

/// Entropy overrides shared by commands that synthesize charges.
#[derive(Args, Debug, Clone, Default)]
pub struct EntropyArgs {
    /// Skip the remote entropy service and use local entropy only
    #[arg(long)]
    pub offline: bool,

    /// Seed for the local entropy stream (makes offline runs reproducible)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fixed entropy bytes in [0, 255], comma separated; one per dimension
    #[arg(long, value_delimiter = ',', conflicts_with = "offline")]
    pub bytes: Option<Vec<u8>>,
}

impl EntropyArgs {
    /// Fold command-line overrides into `config`.
    pub fn apply(&self, config: &mut OracleConfig) {
        if self.offline {
            config.entropy.remote_enabled = false;
        }
        if self.seed.is_some() {
            config.entropy.seed = self.seed;
        }
    }

    /// Entropy source honoring `--bytes`, otherwise built from `config`.
    pub fn build(&self, config: &OracleConfig) -> GuardedEntropy {
        match &self.bytes {
            Some(bytes) => GuardedEntropy::new(
                Arc::new(StaticEntropy::new(bytes.clone())),
                LocalEntropy::from_seed(config.entropy.seed),
                config.entropy_timeout(),
            ),
            None => GuardedEntropy::from_config(&config.entropy),
        }
    }
}

/// Artifact override shared by commands that need the table.
#[derive(Args, Debug, Clone, Default)]
pub struct ArtifactArgs {
    /// Embedding artifact path (overrides artifact.path)
    #[arg(long)]
    pub artifact: Option<PathBuf>,
}

impl ArtifactArgs {
    pub fn apply(&self, config: &mut OracleConfig) {
        if let Some(path) = &self.artifact {
            config.artifact.path = path.to_string_lossy().into_owned();
        }
    }
}
