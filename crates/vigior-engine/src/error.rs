use thiserror::Error;

use crate::validation::FieldError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown scoring model: {0}")]
    UnknownModel(String),

    #[error("invalid observation: {}", summarize(.0))]
    InvalidObservation(Vec<FieldError>),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
