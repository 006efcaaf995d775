use axum::extract::State;
use axum::Json;
use serde::Serialize;

use vigior_engine::all_models;

use crate::state::AppState;

#[derive(Serialize)]
pub struct ModelSummary {
    id: String,
    name: String,
    /// Whether this server scores with it.
    active: bool,
}

pub async fn list_models(State(state): State<AppState>) -> Json<Vec<ModelSummary>> {
    let active = state.engine.model().id();
    let models = all_models()
        .iter()
        .map(|m| ModelSummary {
            id: m.id().to_string(),
            name: m.name().to_string(),
            active: m.id() == active,
        })
        .collect();
    Json(models)
}
