//! Sub-configuration structures for oracle components.
//!
//! This module contains the individual configuration structs
//! that make up the main `OracleConfig` structure.

use serde::{Deserialize, Serialize};

/// Default random.org integer endpoint.
pub const DEFAULT_ENTROPY_ENDPOINT: &str = "https://www.random.org/integers/";

/// Entropy source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntropyConfig {
    /// Base URL of the remote integer service (random.org protocol)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Upper bound on the remote fetch in milliseconds (default: 3000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// When false, only the local pseudo-random source is used
    #[serde(default = "default_remote_enabled")]
    pub remote_enabled: bool,

    /// Seed for the local fallback. Unseeded fallbacks are not reproducible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENTROPY_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    3_000
}

fn default_remote_enabled() -> bool {
    true
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            remote_enabled: default_remote_enabled(),
            seed: None,
        }
    }
}

/// Charge synthesis configuration.
///
/// `iterations = min(floor(energy * work_load_factor / work_per_iteration) + 1, max_iterations)`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SynthesisConfig {
    #[serde(default = "default_work_load_factor")]
    pub work_load_factor: u64,

    #[serde(default = "default_work_per_iteration")]
    pub work_per_iteration: u64,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_work_load_factor() -> u64 {
    1_000
}

fn default_work_per_iteration() -> u64 {
    5_000
}

fn default_max_iterations() -> u32 {
    75
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            work_load_factor: default_work_load_factor(),
            work_per_iteration: default_work_per_iteration(),
            max_iterations: default_max_iterations(),
        }
    }
}

/// Crystallization walk configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrystallizeConfig {
    /// Maximum walk steps, and so maximum words (1..=32)
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Multiplier on the mean absolute charge giving the stop threshold
    #[serde(default = "default_threshold_factor")]
    pub threshold_factor: f32,
}

/// Hard ceiling on crystallization steps.
pub const MAX_CRYSTAL_STEPS: usize = 32;

fn default_max_steps() -> usize {
    MAX_CRYSTAL_STEPS
}

fn default_threshold_factor() -> f32 {
    0.95
}

impl Default for CrystallizeConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            threshold_factor: default_threshold_factor(),
        }
    }
}

/// On-disk format of the embedding artifact.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// JSON for `.json` files, text otherwise
    #[default]
    Auto,
    /// `{"words": [...], "vectors": [[...]]}`
    Json,
    /// `word v1 v2 ... vD` per line
    Text,
}

/// Embedding artifact configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub path: String,
    pub format: ArtifactFormat,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            path: "data/oracle_ocean.json".to_string(),
            format: ArtifactFormat::Auto,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
            include_location: false,
        }
    }
}
