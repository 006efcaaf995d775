use vigior_core::record_ids::{is_record_id, new_record_id, RECORD_PREFIX};

#[test]
fn generated_ids_have_prefix_and_eight_hex_digits() {
    let id = new_record_id();
    assert!(id.starts_with(RECORD_PREFIX));
    assert_eq!(id.len(), RECORD_PREFIX.len() + 8);
    assert!(is_record_id(&id), "{id} should be a valid record id");
}

#[test]
fn generated_ids_differ() {
    let a = new_record_id();
    let b = new_record_id();
    assert_ne!(a, b);
}

#[test]
fn rejects_malformed_ids() {
    assert!(!is_record_id(""));
    assert!(!is_record_id("H-"));
    assert!(!is_record_id("H-001"));
    assert!(!is_record_id("X-1A2B3C4D"));
    assert!(!is_record_id("H-1a2b3c4d"));
    assert!(!is_record_id("H-1A2B3C4G"));
    assert!(!is_record_id("H-1A2B3C4D5"));
}
