use serde::{Deserialize, Serialize};
use ts_rs::TS;
use vigior_core::models::scores::RiskScores;

/// Upper bound of every risk percentage.
pub const MAX_RISK: f64 = 100.0;

/// `[condition]` in the scoring formulas: 1 if true, else 0.
pub fn indicator(condition: bool) -> f64 {
    if condition { 1.0 } else { 0.0 }
}

/// Clip to `[0, 100]`, then round to one decimal place, ties to even.
pub fn clip_round(value: f64) -> f64 {
    (value.clamp(0.0, MAX_RISK) * 10.0).round_ties_even() / 10.0
}

/// Weights of the composite surgical score S_SURG.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct CompositeWeights {
    pub necrosis: f64,
    pub nonunion: f64,
    pub fixation_failure: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            necrosis: 0.4,
            nonunion: 0.35,
            fixation_failure: 0.25,
        }
    }
}

impl CompositeWeights {
    pub fn combine(&self, necrosis: f64, nonunion: f64, fixation_failure: f64) -> f64 {
        self.necrosis * necrosis
            + self.nonunion * nonunion
            + self.fixation_failure * fixation_failure
    }
}

/// Unclipped component sums, as produced by a model's formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawScores {
    pub necrosis: f64,
    pub nonunion: f64,
    pub fixation_failure: f64,
}

impl RawScores {
    /// Build final scores. The composite is taken over the unclipped sums,
    /// then each of the four is clipped and rounded on its own.
    pub fn finish(self, weights: &CompositeWeights) -> RiskScores {
        let composite = weights.combine(self.necrosis, self.nonunion, self.fixation_failure);
        RiskScores {
            avascular_necrosis_risk: clip_round(self.necrosis),
            nonunion_risk: clip_round(self.nonunion),
            fixation_failure_risk: clip_round(self.fixation_failure),
            composite_surgical_risk: clip_round(composite),
        }
    }
}
