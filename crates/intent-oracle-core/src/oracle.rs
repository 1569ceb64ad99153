//! Request-level facade: intent text in, crystal out.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::charge::{ChargeStats, ChargeVectorSynthesizer};
use crate::config::OracleConfig;
use crate::crystallize::{EmbeddingCrystallizer, StopReason};
use crate::entropy::{EntropyOrigin, GuardedEntropy};
use crate::error::{OracleError, OracleResult};
use crate::table::EmbeddingTable;

/// Characters of intent/crystal text kept in log lines.
const LOG_PREVIEW_CHARS: usize = 100;

/// Response for one intent.
#[derive(Debug, Clone, Serialize)]
pub struct Manifestation {
    pub intent: String,
    /// Crystal words joined by single spaces
    pub crystal: String,
    /// Wall time for both stages, seconds rounded to milliseconds
    pub meditation_time_sec: f64,
    pub entropy_origin: EntropyOrigin,
    pub entropy_source: &'static str,
    pub stop_reason: StopReason,
    pub charge: ChargeStats,
}

/// Owns a shared table and both pipeline stages.
pub struct Oracle {
    table: Arc<EmbeddingTable>,
    synthesizer: ChargeVectorSynthesizer,
    crystallizer: EmbeddingCrystallizer,
}

impl Oracle {
    pub fn new(
        table: Arc<EmbeddingTable>,
        synthesizer: ChargeVectorSynthesizer,
        crystallizer: EmbeddingCrystallizer,
    ) -> Self {
        Self {
            table,
            synthesizer,
            crystallizer,
        }
    }

    /// Wire both stages from configuration around an already-loaded table.
    pub fn from_config(table: Arc<EmbeddingTable>, config: &OracleConfig) -> Self {
        let entropy = GuardedEntropy::from_config(&config.entropy);
        Self::with_entropy(table, entropy, config)
    }

    /// As [`Oracle::from_config`], with an explicit entropy source.
    pub fn with_entropy(
        table: Arc<EmbeddingTable>,
        entropy: GuardedEntropy,
        config: &OracleConfig,
    ) -> Self {
        Self::new(
            table,
            ChargeVectorSynthesizer::new(entropy, config.synthesis.clone()),
            EmbeddingCrystallizer::new(config.crystallize.clone()),
        )
    }

    pub fn table(&self) -> &EmbeddingTable {
        &self.table
    }

    /// Synthesize a charge for `intent` and crystallize it.
    ///
    /// Rejects empty or whitespace-only intents.
    pub async fn manifest(&self, intent: &str) -> OracleResult<Manifestation> {
        if intent.trim().is_empty() {
            return Err(OracleError::EmptyIntent);
        }

        info!(intent = %preview(intent), "Intent received");
        let started = Instant::now();

        let charge = self
            .synthesizer
            .synthesize(intent, self.table.dimension())
            .await?;
        let crystal = self
            .crystallizer
            .crystallize(charge.vector.as_slice(), &self.table)?;
        let text = crystal.text();

        let meditation_time_sec = (started.elapsed().as_secs_f64() * 1000.0).round() / 1000.0;
        info!(
            intent = %preview(intent),
            crystal = %preview(&text),
            words = crystal.len(),
            stop_reason = %crystal.stop_reason,
            entropy = charge.source,
            seconds = meditation_time_sec,
            "Intent crystallized"
        );

        Ok(Manifestation {
            intent: intent.to_string(),
            crystal: text,
            meditation_time_sec,
            entropy_origin: charge.origin,
            entropy_source: charge.source,
            stop_reason: crystal.stop_reason,
            charge: charge.stats,
        })
    }
}

/// First `LOG_PREVIEW_CHARS` characters, with an ellipsis when cut.
fn preview(text: &str) -> String {
    match text.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
