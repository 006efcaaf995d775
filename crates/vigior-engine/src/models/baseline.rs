use vigior_core::models::observation::ClinicalObservation;
use vigior_core::models::scores::RiskScores;

use crate::models::canonical::REFERENCE_HSA;
use crate::scoring::{indicator, CompositeWeights, RawScores};
use crate::ScoringModel;

/// Early simplified formulas: no bone-quality or comorbidity terms, and
/// smoking does not raise nonunion risk.
#[derive(Debug, Clone, Default)]
pub struct Baseline {
    pub weights: CompositeWeights,
}

impl Baseline {
    pub fn with_weights(weights: CompositeWeights) -> Self {
        Self { weights }
    }
}

impl ScoringModel for Baseline {
    fn id(&self) -> &str {
        "baseline"
    }

    fn name(&self) -> &str {
        "VIGIOR-H baseline (no bone quality or comorbidity terms)"
    }

    fn compute_scores(&self, observation: &ClinicalObservation) -> RiskScores {
        let o = observation;
        let fragments = f64::from(o.fragment_count);
        let gap = o.interfragmentary_gap;

        RawScores {
            necrosis: 10.0
                + 6.0 * indicator(o.age > 65)
                + 7.0 * indicator(o.smoker)
                + 3.0 * fragments
                + 0.3 * (REFERENCE_HSA - o.head_shaft_angle)
                + 1.5 * gap,
            nonunion: 8.0 + 2.0 * fragments + 2.0 * gap + 4.0 * indicator(o.age > 70),
            fixation_failure: 5.0 + 3.0 * fragments + 1.5 * gap,
        }
        .finish(&self.weights)
    }
}
