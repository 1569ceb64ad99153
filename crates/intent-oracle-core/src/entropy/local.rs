//! Local pseudo-random entropy.

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{EntropyResult, EntropySource};

/// Uniform values in `[-1, 1)` from a ChaCha8 stream.
///
/// Seeded instances replay the same sequence, which is the only way the
/// fallback path becomes reproducible.
pub struct LocalEntropy {
    rng: Mutex<ChaCha8Rng>,
    seed: Option<u64>,
}

impl LocalEntropy {
    /// Reproducible source.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            seed: Some(seed),
        }
    }

    /// Source seeded from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
            seed: None,
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Draw `dimension` values; never fails.
    pub fn sample(&self, dimension: usize) -> Vec<f32> {
        let mut rng = self.rng.lock();
        (0..dimension)
            .map(|_| rng.gen::<f32>() * 2.0 - 1.0)
            .collect()
    }
}

#[async_trait]
impl EntropySource for LocalEntropy {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn draw(&self, dimension: usize) -> EntropyResult<Vec<f32>> {
        Ok(self.sample(dimension))
    }
}
