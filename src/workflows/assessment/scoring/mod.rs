mod config;
mod rules;

pub use config::{BandThresholds, ScoringConfig};

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use super::catalog::QuestionCatalog;
use super::domain::{AnswerValue, Band, Dimension, QuestionId};

/// Stateless scorer that converts a complete answer set into a report.
///
/// Pure and deterministic: identical answers always produce an identical
/// report.
pub struct ScoringEngine {
    catalog: Arc<QuestionCatalog>,
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(catalog: Arc<QuestionCatalog>, config: ScoringConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(
        &self,
        answers: &BTreeMap<QuestionId, AnswerValue>,
    ) -> Result<ScoreReport, ScoringError> {
        let tallies = rules::tally_dimensions(&self.catalog, answers)?;

        let mut dimension_scores = BTreeMap::new();
        let mut bands = BTreeMap::new();
        for tally in &tallies {
            let score = if tally.max_points == 0 {
                0.0
            } else {
                round1(tally.raw_points as f64 / tally.max_points as f64 * 100.0)
            };
            dimension_scores.insert(tally.dimension, score);
            bands.insert(tally.dimension, self.config.thresholds.band_for(score));
        }

        let composite_score = weighted_mean(&dimension_scores, &self.config.dimension_weights);
        let composite_band = self.config.thresholds.band_for(composite_score);

        Ok(ScoreReport {
            dimension_scores,
            bands,
            composite_score,
            composite_band,
        })
    }
}

/// Scored profile of a completed session. Every dimension appears exactly
/// once in `dimension_scores` and `bands`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub dimension_scores: BTreeMap<Dimension, f64>,
    pub bands: BTreeMap<Dimension, Band>,
    pub composite_score: f64,
    pub composite_band: Band,
}

/// Defensive validation failures when scoring an answer set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("expected {expected} answers, found {found}")]
    IncompleteAnswers { expected: usize, found: usize },
    #[error("answer references unknown question {id}")]
    UnknownQuestion { id: QuestionId },
    #[error("question {id} does not accept answer '{value}'")]
    ValueOutOfScale { id: QuestionId, value: AnswerValue },
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn weighted_mean(scores: &BTreeMap<Dimension, f64>, weights: &BTreeMap<Dimension, f64>) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for (dimension, score) in scores {
        let weight = weights.get(dimension).copied().unwrap_or(1.0);
        weighted_sum += score * weight;
        total_weight += weight;
    }
    if total_weight == 0.0 {
        0.0
    } else {
        weighted_sum / total_weight
    }
}
