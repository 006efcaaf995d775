use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown treatment label: {0}")]
    UnknownTreatment(String),
}
