//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while fetching raw events from a source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read event file: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid source response: {0}")]
    InvalidResponse(String),

    #[error("Failed to parse event records: {0}")]
    Parse(#[from] ParseError),
}

/// Errors that can occur while parsing raw event records
///
/// Only `JsonError` and `InvalidFormat` abort a run; the others describe
/// why a single record was skipped.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid event format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Errors raised by the event aggregator
///
/// These signal a broken internal invariant, never bad input.
#[derive(Error, Debug, PartialEq)]
pub enum AggregateError {
    #[error("Negative buffering interval ({seconds}s) in session {session_id}")]
    NegativeInterval { session_id: String, seconds: f64 },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
