//! vigior-engine
//!
//! Risk scoring and treatment decision rules for proximal humerus fractures.
//! Pure and synchronous: every function here maps a [`ClinicalObservation`]
//! to the same result each time it is called.

pub mod cascade;
pub mod config;
pub mod engine;
pub mod error;
pub mod factors;
pub mod models;
pub mod scoring;
pub mod validation;

use vigior_core::models::observation::ClinicalObservation;
use vigior_core::models::recommendation::Recommendation;
use vigior_core::models::scores::RiskScores;

/// A replaceable risk-scoring strategy.
///
/// The formulas are heuristics awaiting a real statistical model, so the
/// cascade never depends on a specific implementation.
pub trait ScoringModel: Send + Sync {
    /// Unique identifier (e.g., "canonical", "baseline").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Compute the four risk scores. Total: never fails.
    fn compute_scores(&self, observation: &ClinicalObservation) -> RiskScores;
}

/// Return all registered scoring models.
pub fn all_models() -> Vec<Box<dyn ScoringModel>> {
    vec![
        Box::new(models::canonical::Canonical::default()),
        Box::new(models::baseline::Baseline::default()),
    ]
}

/// Look up a scoring model by ID.
pub fn get_model(id: &str) -> Option<Box<dyn ScoringModel>> {
    all_models().into_iter().find(|m| m.id() == id)
}

/// Score an observation with the canonical formulas.
pub fn compute_scores(observation: &ClinicalObservation) -> RiskScores {
    models::canonical::Canonical::default().compute_scores(observation)
}

/// Run the default decision cascade over precomputed scores.
pub fn propose_treatment(scores: &RiskScores, observation: &ClinicalObservation) -> Recommendation {
    cascade::DecisionCascade::default().propose(scores, observation)
}
