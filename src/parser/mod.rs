//! Event parsing and schema definitions.
//!
//! This module handles:
//! - Converting raw JSON records into typed events
//! - Skipping malformed records without aborting the run
//! - Defining the report schema

pub mod events;
pub mod schema;

// Re-export main types
pub use events::{parse_events, parse_record, parse_timestamp, parse_timestamp_str, ParsedEvents};
pub use schema::{
    AggregationDiagnostics, BufferingReport, EventType, GlobalSummary, RawEvent, SessionAggregate,
};
