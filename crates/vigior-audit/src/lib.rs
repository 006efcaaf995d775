//! vigior-audit
//!
//! Application-level audit events for patient record changes.

pub mod events;
