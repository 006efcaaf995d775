use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Heuristic risk percentages derived from a [`ClinicalObservation`].
///
/// Every field is clipped to `[0, 100]` and rounded to one decimal place.
///
/// [`ClinicalObservation`]: super::observation::ClinicalObservation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskScores {
    /// S_AVN: avascular necrosis of the humeral head.
    pub avascular_necrosis_risk: f64,
    /// S_PSEU: nonunion / pseudarthrosis.
    pub nonunion_risk: f64,
    /// S_FAIL_FIX: loss of reduction or fixation failure.
    pub fixation_failure_risk: f64,
    /// S_SURG: weighted combination of the three above.
    pub composite_surgical_risk: f64,
}

impl RiskScores {
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.avascular_necrosis_risk,
            self.nonunion_risk,
            self.fixation_failure_risk,
            self.composite_surgical_risk,
        ]
    }
}
