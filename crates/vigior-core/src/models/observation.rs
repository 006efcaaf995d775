use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BoneQuality {
    #[default]
    Normal,
    Poor,
}

impl BoneQuality {
    pub fn is_poor(self) -> bool {
        self == BoneQuality::Poor
    }
}

/// Clinical inputs collected for one proximal humerus fracture evaluation.
///
/// Immutable once submitted. Scores and recommendations are pure functions
/// of this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalObservation {
    /// Age in whole years.
    pub age: u32,
    pub smoker: bool,
    pub comorbidity_count: u32,
    pub bone_quality: BoneQuality,
    /// Number of major fragments (Neer classification).
    pub fragment_count: u32,
    /// Head-shaft angle in degrees.
    pub head_shaft_angle: f64,
    /// Interfragmentary gap in millimeters.
    pub interfragmentary_gap: f64,
    /// Only collected by some forms; absent means false.
    #[serde(default)]
    pub tuberosities_irreparable: bool,
}
