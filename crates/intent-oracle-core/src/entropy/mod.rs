//! Entropy sources seeding the charge vector.
//!
//! Every source yields `D` values already scaled to `[-1, 1]`. Integer
//! sources in `[0, 255]` are mapped with [`scale_byte`].
//!
//! | Source              | Fallible | Deterministic            |
//! |---------------------|----------|--------------------------|
//! | [`RemoteEntropy`]   | yes      | no                       |
//! | [`LocalEntropy`]    | no       | only when seeded         |
//! | [`StaticEntropy`]   | yes      | yes                      |
//!
//! The synthesizer never talks to a source directly. It goes through
//! [`GuardedEntropy`], which bounds the primary source with a timeout and
//! substitutes local entropy on any failure.

mod guarded;
mod local;
mod remote;
mod stub;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use guarded::GuardedEntropy;
pub use local::LocalEntropy;
pub use remote::RemoteEntropy;
pub use stub::{StaticEntropy, UnavailableEntropy};

/// Failures of a single entropy draw.
///
/// These never reach oracle callers: [`GuardedEntropy`] logs them and falls
/// back to local entropy.
#[derive(Debug, Error)]
pub enum EntropyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Entropy service returned status {0}")]
    Status(u16),

    #[error("Malformed entropy response: {0}")]
    Malformed(String),

    #[error("Entropy count mismatch: expected {expected}, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Entropy source timed out after {0:?}")]
    Timeout(Duration),

    #[error("Entropy source unavailable: {0}")]
    Unavailable(String),
}

/// Result type for entropy draws.
pub type EntropyResult<T> = Result<T, EntropyError>;

/// A provider of `D` values in `[-1, 1]`.
#[async_trait]
pub trait EntropySource: Send + Sync {
    /// Short name used in logs and manifestations.
    fn name(&self) -> &'static str;

    /// Draw exactly `dimension` values in `[-1, 1]`.
    async fn draw(&self, dimension: usize) -> EntropyResult<Vec<f32>>;
}

/// Which side of a [`GuardedEntropy`] produced a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntropyOrigin {
    Primary,
    Fallback,
}

/// Values from a guarded draw together with their provenance.
#[derive(Debug, Clone)]
pub struct EntropyDraw {
    pub values: Vec<f32>,
    pub origin: EntropyOrigin,
    pub source: &'static str,
}

/// Map an integer in `[0, 255]` onto `[-1, 1)` via `(x - 128) / 128`.
///
/// ```
/// use intent_oracle_core::entropy::scale_byte;
///
/// assert_eq!(scale_byte(128), 0.0);
/// assert_eq!(scale_byte(0), -1.0);
/// assert!((scale_byte(255) - 0.9921875).abs() < 1e-7);
/// ```
pub fn scale_byte(x: u8) -> f32 {
    (x as f32 - 128.0) / 128.0
}
