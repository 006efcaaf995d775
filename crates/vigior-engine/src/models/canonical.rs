use vigior_core::models::observation::ClinicalObservation;
use vigior_core::models::scores::RiskScores;

use crate::scoring::{indicator, CompositeWeights, RawScores};
use crate::ScoringModel;

/// Reference head-shaft angle. Below it necrosis risk rises; above it the
/// angle term turns negative and lowers the score.
pub const REFERENCE_HSA: f64 = 130.0;

/// The most evolved formula set, with bone-quality and comorbidity terms.
///
/// ```text
/// S_AVN      = 10 + 6[age>65] + 7[smoker] + 3f + 0.3(130 - HSA) + 1.5 gap + 10[poor]
/// S_PSEU     =  8 + 2f + 2 gap + 4[age>70] + 5[smoker] + 8[poor]
/// S_FAIL_FIX =  5 + 4[poor] + 3f + 2[comorbidities>=1] + 1.5 gap
/// ```
#[derive(Debug, Clone, Default)]
pub struct Canonical {
    pub weights: CompositeWeights,
}

impl Canonical {
    pub fn with_weights(weights: CompositeWeights) -> Self {
        Self { weights }
    }

    pub fn raw_scores(observation: &ClinicalObservation) -> RawScores {
        let o = observation;
        let fragments = f64::from(o.fragment_count);
        let gap = o.interfragmentary_gap;
        let smoker = indicator(o.smoker);
        let poor = indicator(o.bone_quality.is_poor());

        let necrosis = 10.0
            + 6.0 * indicator(o.age > 65)
            + 7.0 * smoker
            + 3.0 * fragments
            + 0.3 * (REFERENCE_HSA - o.head_shaft_angle)
            + 1.5 * gap
            + 10.0 * poor;

        let nonunion = 8.0
            + 2.0 * fragments
            + 2.0 * gap
            + 4.0 * indicator(o.age > 70)
            + 5.0 * smoker
            + 8.0 * poor;

        let fixation_failure = 5.0
            + 4.0 * poor
            + 3.0 * fragments
            + 2.0 * indicator(o.comorbidity_count >= 1)
            + 1.5 * gap;

        RawScores {
            necrosis,
            nonunion,
            fixation_failure,
        }
    }
}

impl ScoringModel for Canonical {
    fn id(&self) -> &str {
        "canonical"
    }

    fn name(&self) -> &str {
        "VIGIOR-H canonical heuristic"
    }

    fn compute_scores(&self, observation: &ClinicalObservation) -> RiskScores {
        Self::raw_scores(observation).finish(&self.weights)
    }
}
