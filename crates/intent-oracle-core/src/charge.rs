//! Charge-vector synthesis.
//!
//! Turns intent text plus an entropy draw into a unit-length `f32` vector:
//!
//! 1. `energy` = sum of the UTF-8 bytes of the intent.
//! 2. A base vector of `D` values in `[-1, 1]` is drawn from a
//!    [`GuardedEntropy`].
//! 3. Byte `b` at position `i` adds `(b - 128) / 128` to
//!    `base[SHA-256([i mod 256]) mod D]`. Colliding positions accumulate.
//! 4. `iterations = min(floor(energy * 1000 / 5000) + 1, 75)`.
//! 5. Each iteration maps `x -> sin(pi * x)` and L2-normalizes. A zero norm
//!    ends refinement and the vector is returned as it stands.
//!
//! Steps 1 and 3-5 live in [`charge_from_base`], which is synchronous and
//! takes the base vector directly.

use std::f32::consts::PI;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::SynthesisConfig;
use crate::entropy::{EntropyOrigin, GuardedEntropy};
use crate::error::{OracleError, OracleResult};
use crate::similarity::{l2_norm, l2_normalize};

/// Positions hash through a single byte, so the index sequence repeats
/// every 256 bytes of intent.
const POSITION_PERIOD: usize = 256;

/// The seed vector of a crystallization walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChargeVector(Vec<f32>);

impl ChargeVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn norm(&self) -> f32 {
        l2_norm(&self.0)
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for ChargeVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Bookkeeping from one synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChargeStats {
    /// Sum of intent bytes
    pub energy: u64,
    /// Planned refinement passes
    pub iterations: u32,
    /// Passes that completed with a non-zero norm
    pub passes: u32,
    /// True when refinement stopped on a zero-norm vector
    pub collapsed: bool,
}

/// A synthesized charge together with its entropy provenance.
#[derive(Debug, Clone)]
pub struct SynthesizedCharge {
    pub vector: ChargeVector,
    pub stats: ChargeStats,
    pub origin: EntropyOrigin,
    pub source: &'static str,
}

/// Sum of the UTF-8 byte values of `text`.
pub fn intent_energy(text: &str) -> u64 {
    text.bytes().map(u64::from).sum()
}

/// Number of refinement passes for a given intent energy.
///
/// ```
/// use intent_oracle_core::charge::iteration_count;
/// use intent_oracle_core::config::SynthesisConfig;
///
/// let config = SynthesisConfig::default();
/// assert_eq!(iteration_count(0, &config), 1);
/// assert_eq!(iteration_count(65, &config), 14);
/// assert_eq!(iteration_count(1_000_000, &config), 75);
/// ```
pub fn iteration_count(energy: u64, config: &SynthesisConfig) -> u32 {
    let work_load = energy.saturating_mul(config.work_load_factor);
    let passes = work_load / config.work_per_iteration.max(1) + 1;
    passes.min(u64::from(config.max_iterations)) as u32
}

/// Table index perturbed by the intent byte at `position`.
///
/// SHA-256 of the single byte `position mod 256`, read as a big-endian
/// integer, reduced modulo `dimension`. `dimension` must be non-zero.
pub fn perturbation_index(position: usize, dimension: usize) -> usize {
    let digest = Sha256::digest([(position % POSITION_PERIOD) as u8]);
    let modulus = dimension as u128;
    let rem = digest
        .iter()
        .fold(0u128, |acc, &byte| (acc * 256 + u128::from(byte)) % modulus);
    rem as usize
}

/// Add each intent byte's signed contribution into `base`.
fn perturb(base: &mut [f32], text: &str) {
    let dimension = base.len();
    let period: Vec<usize> = (0..POSITION_PERIOD.min(text.len()))
        .map(|i| perturbation_index(i, dimension))
        .collect();

    for (i, byte) in text.bytes().enumerate() {
        base[period[i % POSITION_PERIOD]] += (f32::from(byte) - 128.0) / 128.0;
    }
}

/// Apply `sin(pi * x)` + L2 normalization up to `iterations` times.
///
/// Returns the number of passes that normalized successfully; fewer than
/// `iterations` means the vector collapsed to zero norm.
fn refine(values: &mut [f32], iterations: u32) -> u32 {
    for pass in 0..iterations {
        for x in values.iter_mut() {
            *x = (*x * PI).sin();
        }
        if !l2_normalize(values) {
            return pass;
        }
    }
    iterations
}

/// Deterministic half of synthesis: perturb `base` with `text` and refine.
pub fn charge_from_base(
    text: &str,
    mut base: Vec<f32>,
    config: &SynthesisConfig,
) -> OracleResult<(ChargeVector, ChargeStats)> {
    if base.is_empty() {
        return Err(OracleError::InvalidDimension(0));
    }

    let energy = intent_energy(text);
    perturb(&mut base, text);

    let iterations = iteration_count(energy, config);
    let passes = refine(&mut base, iterations);

    let stats = ChargeStats {
        energy,
        iterations,
        passes,
        collapsed: passes < iterations,
    };
    Ok((ChargeVector(base), stats))
}

/// Draws entropy and synthesizes charge vectors.
pub struct ChargeVectorSynthesizer {
    entropy: GuardedEntropy,
    config: SynthesisConfig,
}

impl ChargeVectorSynthesizer {
    pub fn new(entropy: GuardedEntropy, config: SynthesisConfig) -> Self {
        Self { entropy, config }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Synthesize a charge of length `dimension` for `text`.
    ///
    /// Entropy failures are absorbed by the guarded source; only
    /// `dimension == 0` is an error.
    pub async fn synthesize(&self, text: &str, dimension: usize) -> OracleResult<SynthesizedCharge> {
        if dimension == 0 {
            return Err(OracleError::InvalidDimension(0));
        }

        let draw = self.entropy.draw(dimension).await;
        let (vector, stats) = charge_from_base(text, draw.values, &self.config)?;

        debug!(
            energy = stats.energy,
            iterations = stats.iterations,
            passes = stats.passes,
            collapsed = stats.collapsed,
            source = draw.source,
            "Charge synthesized"
        );

        Ok(SynthesizedCharge {
            vector,
            stats,
            origin: draw.origin,
            source: draw.source,
        })
    }
}
