//! vigior-storage
//!
//! Append-only flat-file persistence for patient records. One JSON object
//! per line; the file is rewritten only when clinical notes are edited.

pub mod error;
pub mod records;
pub mod search;
