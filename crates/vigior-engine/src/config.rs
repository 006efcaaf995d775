use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cascade::Thresholds;
use crate::scoring::CompositeWeights;
use crate::validation::InputPolicy;

pub const DEFAULT_MODEL_ID: &str = "canonical";

/// Engine settings. Every field has a default so partial configs load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct EngineConfig {
    pub model_id: String,
    pub input_policy: InputPolicy,
    pub weights: CompositeWeights,
    pub thresholds: Thresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            input_policy: InputPolicy::default(),
            weights: CompositeWeights::default(),
            thresholds: Thresholds::default(),
        }
    }
}
