//! vigior-core
//!
//! Pure domain types and record-ID conventions for proximal humerus fracture
//! evaluations. No I/O; this is the shared vocabulary of the VIGIOR system.

pub mod error;
pub mod models;
pub mod record_ids;
