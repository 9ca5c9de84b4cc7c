//! Event and report schema definitions.
//!
//! `RawEvent` is the in-memory input of the aggregator. The remaining
//! types make up the JSON report we write to disk; the report is
//! versioned to allow future evolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::utils::config::{BUFFER_END, BUFFER_START};

/// Kind of a buffering event
///
/// Unrecognized kinds are kept verbatim so the aggregator can skip
/// and tally them instead of the parser dropping them silently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    BufferStart,
    BufferEnd,
    Other(String),
}

impl FromStr for EventType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            BUFFER_START => Self::BufferStart,
            BUFFER_END => Self::BufferEnd,
            other => Self::Other(other.to_string()),
        })
    }
}

impl EventType {
    /// Wire name of this event kind
    pub fn as_str(&self) -> &str {
        match self {
            Self::BufferStart => BUFFER_START,
            Self::BufferEnd => BUFFER_END,
            Self::Other(name) => name,
        }
    }

    /// Whether this kind takes part in interval pairing
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed buffering occurrence
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub user_id: String,
    pub session_id: String,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
}

impl RawEvent {
    /// Create a new event
    pub fn new(
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        event_type: EventType,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
            event_type,
            timestamp,
        }
    }
}

/// Buffering totals for a single session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAggregate {
    pub session_id: String,

    /// Sum of all closed interval durations
    pub total_buffer_seconds: f64,

    /// Number of closed intervals (not raw events)
    pub event_count: u64,
}

/// Platform-wide totals and averages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSummary {
    pub total_sessions_with_buffering: u64,
    pub total_buffer_seconds: f64,
    pub total_buffering_events: u64,

    /// Zero when there are no sessions
    pub average_buffer_seconds_per_session: f64,

    /// Zero when there are no intervals
    pub average_buffer_seconds_per_event: f64,
}

/// Counters for events that did not form a complete interval
///
/// None of these influence the metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationDiagnostics {
    /// Events whose kind is neither start nor end
    pub unrecognized_events: u64,

    /// Ends with no open start
    pub orphan_ends: u64,

    /// Starts replaced by a later start before any end
    pub abandoned_starts: u64,

    /// Starts still open when the session's events ran out
    pub unterminated_starts: u64,
}

impl AggregationDiagnostics {
    /// Total events that were dropped from the metrics
    pub fn total_dropped(&self) -> u64 {
        self.unrecognized_events + self.orphan_ends + self.abandoned_starts + self.unterminated_starts
    }
}

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferingReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Per-session aggregates, ordered by session id
    pub sessions: Vec<SessionAggregate>,

    pub summary: GlobalSummary,

    #[serde(default)]
    pub diagnostics: AggregationDiagnostics,

    /// Records the parser rejected before aggregation
    #[serde(default)]
    pub skipped_records: u64,
}
