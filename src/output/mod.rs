//! Output writers for buffering reports.
//!
//! This module handles rendering reports:
//! - JSON files (pretty printed)
//! - Text summaries for the terminal

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{read_report, report_to_string, write_report};
pub use text::render_text_summary;
