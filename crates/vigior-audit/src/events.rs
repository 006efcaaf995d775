use serde::Serialize;
use tracing::info;

pub mod action {
    pub const RECORD_CREATED: &str = "record_created";
    pub const NOTES_UPDATED: &str = "notes_updated";
}

pub const PATIENT_RECORD: &str = "patient_record";

/// A structured audit event, logged via `tracing` next to request logs.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            details: None,
        }
    }

    pub fn record_created(id: &str) -> Self {
        Self::new(action::RECORD_CREATED, PATIENT_RECORD, id)
    }

    pub fn notes_updated(id: &str) -> Self {
        Self::new(action::NOTES_UPDATED, PATIENT_RECORD, id)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.details = %details,
            "audit event"
        );
    }
}
