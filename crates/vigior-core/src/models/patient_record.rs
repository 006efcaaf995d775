use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::observation::ClinicalObservation;
use super::recommendation::Recommendation;
use super::scores::RiskScores;

/// One persisted evaluation. Flattened so each record reads as a single row.
///
/// Only `notes` (and `updated_at` alongside it) changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRecord {
    pub id: String,
    pub created_at: jiff::Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<jiff::Timestamp>,
    /// Scoring model that produced `scores`.
    pub model_id: String,
    #[serde(flatten)]
    pub observation: ClinicalObservation,
    #[serde(flatten)]
    pub scores: RiskScores,
    #[serde(flatten)]
    pub recommendation: Recommendation,
    #[serde(default)]
    pub notes: String,
}

impl PatientRecord {
    pub fn new(
        id: String,
        model_id: impl Into<String>,
        observation: ClinicalObservation,
        scores: RiskScores,
        recommendation: Recommendation,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id,
            created_at: jiff::Timestamp::now(),
            updated_at: None,
            model_id: model_id.into(),
            observation,
            scores,
            recommendation,
            notes: notes.into(),
        }
    }
}
