use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use vigior_report::render::render_cohort_summary;
use vigior_report::summary::CohortSummary;
use vigior_storage::search;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CohortQuery {
    pub q: Option<String>,
}

async fn summarize(state: &AppState, keyword: Option<&str>) -> Result<CohortSummary, ApiError> {
    let records = state.with_store(|store| store.list()).await?;
    let matching = search::filter(&records, keyword.unwrap_or_default());
    Ok(CohortSummary::from_records(records.len(), matching, keyword))
}

pub async fn cohort_summary(
    State(state): State<AppState>,
    Query(query): Query<CohortQuery>,
) -> Result<Json<CohortSummary>, ApiError> {
    Ok(Json(summarize(&state, query.q.as_deref()).await?))
}

pub async fn cohort_report(
    State(state): State<AppState>,
    Query(query): Query<CohortQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = summarize(&state, query.q.as_deref()).await?;
    let report = render_cohort_summary(&summary)?;
    Ok(([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], report))
}
