//! Greedy embedding walk turning a charge vector into words.
//!
//! Each step picks the table entry most cosine-similar to the working vector,
//! records its word, then pulls the working vector halfway toward that entry
//! and renormalizes. The walk ends when the selected neighbor's energy
//! (`1 - similarity`) falls below a threshold fixed from the original charge,
//! or on a degenerate vector, or after `max_steps` words.

use serde::Serialize;
use tracing::debug;

use crate::config::{CrystallizeConfig, MAX_CRYSTAL_STEPS};
use crate::error::{OracleError, OracleResult};
use crate::similarity::{argmax_first, cosine_similarity, is_zero, l2_normalize, mean_abs};
use crate::table::EmbeddingTable;

/// Why a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The working vector was all zeros before a lookup.
    ZeroCharge,
    /// Every similarity in the scan was `NaN`.
    Degenerate,
    /// The blended vector had zero norm.
    Collapsed,
    /// The selected neighbor's energy fell below the threshold.
    Converged,
    /// `max_steps` words were produced.
    StepLimit,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::ZeroCharge => "zero_charge",
            StopReason::Degenerate => "degenerate",
            StopReason::Collapsed => "collapsed",
            StopReason::Converged => "converged",
            StopReason::StepLimit => "step_limit",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one crystallization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crystal {
    /// Words in discovery order
    pub words: Vec<String>,
    pub stop_reason: StopReason,
    /// Energy of the last selected neighbor, if any
    pub final_energy: Option<f32>,
    /// Threshold the energies were compared against
    pub stop_threshold: f32,
}

impl Crystal {
    /// Words joined by single spaces.
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Per-call walk state.
struct CrystallizationState {
    current: Vec<f32>,
    words: Vec<String>,
    stop_threshold: f32,
    final_energy: Option<f32>,
}

impl CrystallizationState {
    fn new(charge: &[f32], threshold_factor: f32) -> Self {
        Self {
            current: charge.to_vec(),
            words: Vec::new(),
            stop_threshold: mean_abs(charge) * threshold_factor,
            final_energy: None,
        }
    }

    fn finish(self, stop_reason: StopReason) -> Crystal {
        Crystal {
            words: self.words,
            stop_reason,
            final_energy: self.final_energy,
            stop_threshold: self.stop_threshold,
        }
    }
}

/// Walks an [`EmbeddingTable`] from a charge vector.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingCrystallizer {
    config: CrystallizeConfig,
}

impl EmbeddingCrystallizer {
    pub fn new(config: CrystallizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CrystallizeConfig {
        &self.config
    }

    /// Crystallize `charge` against `table`.
    ///
    /// Fails only when `charge` and `table` disagree on dimension; degenerate
    /// vectors end the walk early with a shorter (possibly empty) crystal.
    pub fn crystallize(&self, charge: &[f32], table: &EmbeddingTable) -> OracleResult<Crystal> {
        if charge.len() != table.dimension() {
            return Err(OracleError::DimensionMismatch {
                expected: table.dimension(),
                actual: charge.len(),
            });
        }

        let max_steps = self.config.max_steps.min(MAX_CRYSTAL_STEPS);
        let mut state = CrystallizationState::new(charge, self.config.threshold_factor);
        let mut similarities = Vec::with_capacity(table.len());

        for step in 0..max_steps {
            if is_zero(&state.current) {
                return Ok(state.finish(StopReason::ZeroCharge));
            }

            similarities.clear();
            similarities.extend(
                table
                    .vectors()
                    .iter()
                    .map(|v| cosine_similarity(&state.current, v)),
            );

            let Some(index) = argmax_first(&similarities) else {
                debug!(step, "All similarities NaN; stopping walk");
                return Ok(state.finish(StopReason::Degenerate));
            };
            let similarity = similarities[index];
            let word = &table.words()[index];
            state.words.push(word.clone());

            for (c, &v) in state.current.iter_mut().zip(&table.vectors()[index]) {
                *c = (*c + v) / 2.0;
            }
            if !l2_normalize(&mut state.current) {
                debug!(step, word = %word, "Blended charge collapsed to zero");
                return Ok(state.finish(StopReason::Collapsed));
            }

            let energy = 1.0 - similarity;
            state.final_energy = Some(energy);
            debug!(step, index, word = %word, similarity, energy, "Crystal step");

            if energy < state.stop_threshold {
                return Ok(state.finish(StopReason::Converged));
            }
        }

        Ok(state.finish(StopReason::StepLimit))
    }
}
