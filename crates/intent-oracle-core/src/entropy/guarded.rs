//! Timeout-bounded primary source with local fallback.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::{
    EntropyDraw, EntropyError, EntropyOrigin, EntropySource, LocalEntropy, RemoteEntropy,
};
use crate::config::EntropyConfig;

/// Wraps an optional primary source; every draw succeeds.
///
/// The primary draw is cut off after `timeout`. Any failure (timeout, error,
/// wrong count) is logged at `warn` and replaced by a local draw.
pub struct GuardedEntropy {
    primary: Option<Arc<dyn EntropySource>>,
    fallback: LocalEntropy,
    timeout: Duration,
}

impl GuardedEntropy {
    pub fn new(primary: Arc<dyn EntropySource>, fallback: LocalEntropy, timeout: Duration) -> Self {
        Self {
            primary: Some(primary),
            fallback,
            timeout,
        }
    }

    /// Local entropy only.
    pub fn local_only(fallback: LocalEntropy) -> Self {
        Self {
            primary: None,
            fallback,
            timeout: Duration::ZERO,
        }
    }

    /// Build from configuration: remote primary when enabled, local fallback
    /// seeded from `config.seed`.
    ///
    /// A remote client that cannot be constructed is logged and skipped.
    pub fn from_config(config: &EntropyConfig) -> Self {
        let fallback = LocalEntropy::from_seed(config.seed);
        if !config.remote_enabled {
            return Self::local_only(fallback);
        }

        let timeout = Duration::from_millis(config.timeout_ms);
        match RemoteEntropy::new(config.endpoint.clone(), timeout) {
            Ok(remote) => Self::new(Arc::new(remote), fallback, timeout),
            Err(e) => {
                warn!(endpoint = %config.endpoint, error = %e, "Remote entropy client unavailable; using local entropy only");
                Self::local_only(fallback)
            }
        }
    }

    pub fn primary_name(&self) -> Option<&'static str> {
        self.primary.as_ref().map(|p| p.name())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Draw `dimension` values, falling back locally on any primary failure.
    pub async fn draw(&self, dimension: usize) -> EntropyDraw {
        if let Some(primary) = &self.primary {
            match self.draw_primary(primary.as_ref(), dimension).await {
                Ok(values) => {
                    debug!(source = primary.name(), dimension, "Primary entropy accepted");
                    return EntropyDraw {
                        values,
                        origin: EntropyOrigin::Primary,
                        source: primary.name(),
                    };
                }
                Err(e) => {
                    warn!(
                        source = primary.name(),
                        error = %e,
                        "External entropy unstable; using local entropy"
                    );
                }
            }
        }

        EntropyDraw {
            values: self.fallback.sample(dimension),
            origin: EntropyOrigin::Fallback,
            source: "local",
        }
    }

    async fn draw_primary(
        &self,
        primary: &dyn EntropySource,
        dimension: usize,
    ) -> Result<Vec<f32>, EntropyError> {
        let values = tokio::time::timeout(self.timeout, primary.draw(dimension))
            .await
            .map_err(|_| EntropyError::Timeout(self.timeout))??;

        if values.len() != dimension {
            return Err(EntropyError::CountMismatch {
                expected: dimension,
                actual: values.len(),
            });
        }
        if let Some(bad) = values.iter().find(|v| !(-1.0..=1.0).contains(*v)) {
            return Err(EntropyError::Malformed(format!(
                "value {} outside [-1, 1]",
                bad
            )));
        }
        Ok(values)
    }
}
