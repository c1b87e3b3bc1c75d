use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{Band, Dimension};

/// Scoring dials: composite weighting, band cut points, and the score below
/// which a dimension triggers recommendations. Defaults weight every
/// dimension equally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub dimension_weights: BTreeMap<Dimension, f64>,
    pub thresholds: BandThresholds,
    pub recommendation_trigger: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            dimension_weights: Dimension::ordered()
                .into_iter()
                .map(|dimension| (dimension, 1.0))
                .collect(),
            thresholds: BandThresholds::default(),
            recommendation_trigger: 60.0,
        }
    }
}

/// Lower bounds of the moderate/strong/excellent tiers on the 0-100 scale,
/// applied identically to every dimension and to the composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub moderate: f64,
    pub strong: f64,
    pub excellent: f64,
}

impl BandThresholds {
    pub fn band_for(&self, score: f64) -> Band {
        if score >= self.excellent {
            Band::Excellent
        } else if score >= self.strong {
            Band::Strong
        } else if score >= self.moderate {
            Band::Moderate
        } else {
            Band::Low
        }
    }
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            moderate: 35.0,
            strong: 55.0,
            excellent: 75.0,
        }
    }
}
