use serde::{Deserialize, Serialize};
use ts_rs::TS;
use vigior_core::models::observation::ClinicalObservation;
use vigior_core::models::recommendation::Recommendation;
use vigior_core::models::scores::RiskScores;

use crate::ScoringModel;
use crate::cascade::DecisionCascade;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::baseline::Baseline;
use crate::models::canonical::Canonical;
use crate::validation::{InputPolicy, apply_policy};

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Evaluation {
    pub model_id: String,
    /// The observation actually scored. Differs from the input only when
    /// the clamp policy moved a field.
    pub observation: ClinicalObservation,
    pub scores: RiskScores,
    pub recommendation: Recommendation,
}

/// A scoring model, a decision cascade and an input policy.
///
/// Holds no mutable state, so one instance can serve any number of
/// concurrent evaluations.
pub struct Engine {
    model: Box<dyn ScoringModel>,
    cascade: DecisionCascade,
    policy: InputPolicy,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(
            Box::new(Canonical::default()),
            DecisionCascade::default(),
            InputPolicy::default(),
        )
    }
}

impl Engine {
    pub fn new(model: Box<dyn ScoringModel>, cascade: DecisionCascade, policy: InputPolicy) -> Self {
        Self {
            model,
            cascade,
            policy,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let model: Box<dyn ScoringModel> = match config.model_id.as_str() {
            "canonical" => Box::new(Canonical::with_weights(config.weights)),
            "baseline" => Box::new(Baseline::with_weights(config.weights)),
            other => return Err(EngineError::UnknownModel(other.to_string())),
        };
        Ok(Self::new(
            model,
            DecisionCascade::new(config.thresholds),
            config.input_policy,
        ))
    }

    pub fn model(&self) -> &dyn ScoringModel {
        self.model.as_ref()
    }

    pub fn cascade(&self) -> &DecisionCascade {
        &self.cascade
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    pub fn evaluate(&self, observation: &ClinicalObservation) -> Result<Evaluation, EngineError> {
        let observation = apply_policy(self.policy, observation).map_err(|errors| {
            tracing::debug!(errors = errors.len(), "observation rejected");
            EngineError::InvalidObservation(errors)
        })?;

        let scores = self.model.compute_scores(&observation);
        let recommendation = self.cascade.propose(&scores, &observation);

        tracing::debug!(
            model = self.model.id(),
            treatment = recommendation.treatment.as_str(),
            rule = %recommendation.rule,
            "observation evaluated"
        );

        Ok(Evaluation {
            model_id: self.model.id().to_string(),
            observation,
            scores,
            recommendation,
        })
    }
}
