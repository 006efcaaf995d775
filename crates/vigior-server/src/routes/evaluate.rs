use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use vigior_core::models::observation::ClinicalObservation;
use vigior_engine::engine::Evaluation;

use crate::error::ApiError;
use crate::state::AppState;

/// Score and classify without persisting anything.
pub async fn evaluate(
    State(state): State<AppState>,
    body: Result<Json<ClinicalObservation>, JsonRejection>,
) -> Result<Json<Evaluation>, ApiError> {
    let Json(observation) = body?;
    let evaluation = state.engine.evaluate(&observation)?;
    Ok(Json(evaluation))
}
