//! Configuration management for the intent oracle.

mod sub_configs;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{OracleError, OracleResult};

pub use sub_configs::{
    ArtifactConfig, ArtifactFormat, CrystallizeConfig, EntropyConfig, LoggingConfig,
    SynthesisConfig, DEFAULT_ENTROPY_ENDPOINT, MAX_CRYSTAL_STEPS,
};

/// Environment variable prefix for overrides (`ORACLE__ENTROPY__TIMEOUT_MS=500`).
pub const ENV_PREFIX: &str = "ORACLE";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OracleConfig {
    pub entropy: EntropyConfig,
    pub synthesis: SynthesisConfig,
    pub crystallize: CrystallizeConfig,
    pub artifact: ArtifactConfig,
    pub logging: LoggingConfig,
}

impl OracleConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in order:
    /// 1. config/default.toml (base settings)
    /// 2. config/{ORACLE_ENV}.toml (environment-specific)
    /// 3. Environment variables with ORACLE__ prefix
    pub fn load() -> OracleResult<Self> {
        let env = std::env::var("ORACLE_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            );

        let config: OracleConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> OracleResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            OracleError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: OracleConfig = toml::from_str(&content)
            .map_err(|e| OracleError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> OracleResult<()> {
        if self.entropy.remote_enabled && self.entropy.endpoint.trim().is_empty() {
            return Err(OracleError::ConfigError(
                "entropy.endpoint cannot be empty when entropy.remote_enabled is set".into(),
            ));
        }

        if self.entropy.timeout_ms == 0 {
            return Err(OracleError::ConfigError(
                "entropy.timeout_ms must be greater than 0".into(),
            ));
        }

        if self.synthesis.work_per_iteration == 0 {
            return Err(OracleError::ConfigError(
                "synthesis.work_per_iteration must be greater than 0".into(),
            ));
        }

        if self.synthesis.max_iterations == 0 {
            return Err(OracleError::ConfigError(
                "synthesis.max_iterations must be greater than 0".into(),
            ));
        }

        if self.crystallize.max_steps == 0 || self.crystallize.max_steps > MAX_CRYSTAL_STEPS {
            return Err(OracleError::ConfigError(format!(
                "crystallize.max_steps must be in 1..={}, got {}",
                MAX_CRYSTAL_STEPS, self.crystallize.max_steps
            )));
        }

        let factor = self.crystallize.threshold_factor;
        if !factor.is_finite() || factor < 0.0 {
            return Err(OracleError::ConfigError(format!(
                "crystallize.threshold_factor must be finite and >= 0, got {}",
                factor
            )));
        }

        if self.artifact.path.trim().is_empty() {
            return Err(OracleError::ConfigError("artifact.path cannot be empty".into()));
        }

        Ok(())
    }

    /// Remote fetch deadline as a [`Duration`].
    pub fn entropy_timeout(&self) -> Duration {
        Duration::from_millis(self.entropy.timeout_ms)
    }
}
