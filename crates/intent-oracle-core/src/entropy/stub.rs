//! Deterministic and always-failing sources.
//!
//! Used to pin the synthesizer in tests and to run the oracle with a known
//! base vector (`intent-oracle charge --bytes ...`).

use std::time::Duration;

use async_trait::async_trait;

use super::{scale_byte, EntropyError, EntropyResult, EntropySource};

/// Replays a fixed byte sequence.
///
/// A request for a dimension other than the sequence length fails with
/// [`EntropyError::CountMismatch`], exactly like a short remote response.
#[derive(Debug, Clone)]
pub struct StaticEntropy {
    bytes: Vec<u8>,
    delay: Option<Duration>,
}

impl StaticEntropy {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            delay: None,
        }
    }

    /// Sleep before answering; lets tests exercise the guard's timeout.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl EntropySource for StaticEntropy {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn draw(&self, dimension: usize) -> EntropyResult<Vec<f32>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.bytes.len() != dimension {
            return Err(EntropyError::CountMismatch {
                expected: dimension,
                actual: self.bytes.len(),
            });
        }
        Ok(self.bytes.iter().copied().map(scale_byte).collect())
    }
}

/// A source that always fails.
#[derive(Debug, Clone, Default)]
pub struct UnavailableEntropy;

#[async_trait]
impl EntropySource for UnavailableEntropy {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn draw(&self, _dimension: usize) -> EntropyResult<Vec<f32>> {
        Err(EntropyError::Unavailable("source disabled".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_scales_bytes() {
        let source = StaticEntropy::new(vec![128, 0, 192, 64]);
        let values = source.draw(4).await.unwrap();
        assert_eq!(values, vec![0.0, -1.0, 0.5, -0.5]);
    }

    #[tokio::test]
    async fn test_static_count_mismatch() {
        let source = StaticEntropy::new(vec![1, 2, 3]);
        assert!(matches!(
            source.draw(4).await,
            Err(EntropyError::CountMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[tokio::test]
    async fn test_unavailable_always_fails() {
        assert!(UnavailableEntropy.draw(1).await.is_err());
    }
}
