use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use vigior_audit::events::AuditEvent;
use vigior_core::models::observation::ClinicalObservation;
use vigior_core::models::patient_record::PatientRecord;
use vigior_core::models::recommendation::TreatmentLabel;
use vigior_core::record_ids::{is_record_id, new_record_id};
use vigior_report::render::render_case_report;
use vigior_storage::error::StorageError;

use crate::error::ApiError;
use crate::state::AppState;

/// Fresh IDs tried before giving up on a collision.
const ID_ATTEMPTS: usize = 3;

#[derive(Debug, Deserialize)]
pub struct RecordQuery {
    /// Keyword matched against every field.
    pub q: Option<String>,
    /// Wire name of a treatment, e.g. `orif`.
    pub treatment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecord {
    pub observation: ClinicalObservation,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNotes {
    pub notes: String,
}

/// Malformed IDs can never be stored, so they are reported as missing
/// without touching the file.
fn known_shape(id: &str) -> Result<(), ApiError> {
    if is_record_id(id) {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("record not found: {id}")))
    }
}

pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<Json<Vec<PatientRecord>>, ApiError> {
    let treatment = query
        .treatment
        .as_deref()
        .map(str::parse::<TreatmentLabel>)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let keyword = query.q;
    let records = state
        .with_store(move |store| match keyword.as_deref() {
            Some(keyword) => store.search(keyword),
            None => store.list(),
        })
        .await?;

    let records = records
        .into_iter()
        .filter(|r| treatment.is_none_or(|t| r.recommendation.treatment == t))
        .collect();
    Ok(Json(records))
}

pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientRecord>, ApiError> {
    known_shape(&id)?;
    let record = state.with_store(move |store| store.get(&id)).await?;
    Ok(Json(record))
}

/// Evaluate an observation and append the result to the store.
pub async fn create_record(
    State(state): State<AppState>,
    body: Result<Json<CreateRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<PatientRecord>), ApiError> {
    let Json(body) = body?;
    let evaluation = state.engine.evaluate(&body.observation)?;
    let mut record = PatientRecord::new(
        new_record_id(),
        evaluation.model_id,
        evaluation.observation,
        evaluation.scores,
        evaluation.recommendation,
        body.notes,
    );

    let record = state
        .with_store(move |store| {
            let mut attempt = 1;
            loop {
                match store.append(&record) {
                    Ok(()) => return Ok(record),
                    Err(StorageError::DuplicateId { id }) if attempt < ID_ATTEMPTS => {
                        tracing::warn!(id = %id, attempt, "record id collision, regenerating");
                        record.id = new_record_id();
                        attempt += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        })
        .await?;

    AuditEvent::record_created(&record.id)
        .with_details(json!({
            "treatment": record.recommendation.treatment,
            "rule": record.recommendation.rule,
        }))
        .emit();

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_notes(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateNotes>, JsonRejection>,
) -> Result<Json<PatientRecord>, ApiError> {
    known_shape(&id)?;
    let Json(body) = body?;
    let notes_len = body.notes.len();
    let record = {
        let id = id.clone();
        state
            .with_store(move |store| store.update_notes(&id, &body.notes))
            .await?
    };

    AuditEvent::notes_updated(&id)
        .with_details(json!({ "length": notes_len }))
        .emit();

    Ok(Json(record))
}

pub async fn case_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    known_shape(&id)?;
    let record = state.with_store(move |store| store.get(&id)).await?;
    let report = render_case_report(&record)?;
    Ok(([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], report))
}
