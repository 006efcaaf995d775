//! Record ID and file-name conventions.
//!
//! Pure string functions. IDs look like `H-1A2B3C4D`: the `H-` prefix
//! followed by the first eight hex digits of a random v4 UUID, uppercased.

use uuid::Uuid;

pub const RECORD_PREFIX: &str = "H-";

const RANDOM_LEN: usize = 8;

pub const DEFAULT_DATA_FILE: &str = "patients.jsonl";

pub fn new_record_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{RECORD_PREFIX}{}", hex[..RANDOM_LEN].to_uppercase())
}

pub fn is_record_id(id: &str) -> bool {
    id.strip_prefix(RECORD_PREFIX).is_some_and(|rest| {
        rest.len() == RANDOM_LEN
            && rest
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
    })
}

