//! vigior-report
//!
//! Markdown case reports and case-series summaries rendered with Tera.

pub mod error;
pub mod render;
pub mod summary;
pub mod templates;
