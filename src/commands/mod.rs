//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod aggregate;
pub mod utils;

// Re-export main command functions
pub use aggregate::{execute_aggregate, run_pipeline, validate_args, AggregateArgs, SourceSpec};
pub use utils::{display_schema, display_version, validate_report_file};
