use vigior_core::models::patient_record::PatientRecord;

/// Case-insensitive substring match against every serialized field of a
/// record. An empty or blank keyword matches everything.
pub fn matches_keyword(record: &PatientRecord, keyword: &str) -> bool {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let Ok(serde_json::Value::Object(row)) = serde_json::to_value(record) else {
        return false;
    };

    row.values().any(|value| {
        let text = match value {
            serde_json::Value::String(s) => s.to_lowercase(),
            other => other.to_string().to_lowercase(),
        };
        text.contains(&needle)
    })
}

/// Keep the records that match `keyword`, preserving order.
pub fn filter<'a>(
    records: impl IntoIterator<Item = &'a PatientRecord>,
    keyword: &str,
) -> Vec<&'a PatientRecord> {
    records
        .into_iter()
        .filter(|r| matches_keyword(r, keyword))
        .collect()
}
