use serde_json::json;
use vigior_audit::events::{action, AuditEvent, PATIENT_RECORD};

#[test]
fn record_created_event_targets_patient_records() {
    let event = AuditEvent::record_created("H-0000ABCD");
    assert_eq!(event.action, action::RECORD_CREATED);
    assert_eq!(event.resource_type, PATIENT_RECORD);
    assert_eq!(event.resource_id, "H-0000ABCD");
    assert!(event.details.is_none());
}

#[test]
fn details_serialize_alongside_the_event() {
    let event = AuditEvent::notes_updated("H-0000ABCD").with_details(json!({ "length": 42 }));
    let value = serde_json::to_value(&event).unwrap();

    assert_eq!(value["action"], "notes_updated");
    assert_eq!(value["details"]["length"], 42);

    // Emitting without a subscriber is a no-op.
    event.emit();
}
