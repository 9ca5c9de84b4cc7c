//! Reduce per-session aggregates into platform-wide metrics.

use super::pairing::Aggregation;
use crate::parser::schema::{BufferingReport, GlobalSummary, SessionAggregate};
use crate::utils::config::SCHEMA_VERSION;
use log::debug;

/// Calculate the global summary from session aggregates
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `sessions` - Aggregates produced by `aggregate_buffering`
///
/// # Returns
/// Totals and averages; both averages are 0 when their denominator is 0
pub fn summarize<'a>(sessions: impl IntoIterator<Item = &'a SessionAggregate>) -> GlobalSummary {
    let mut summary = GlobalSummary::default();

    for session in sessions {
        summary.total_sessions_with_buffering += 1;
        summary.total_buffer_seconds += session.total_buffer_seconds;
        summary.total_buffering_events += session.event_count;
    }

    summary.average_buffer_seconds_per_session =
        ratio(summary.total_buffer_seconds, summary.total_sessions_with_buffering);
    summary.average_buffer_seconds_per_event =
        ratio(summary.total_buffer_seconds, summary.total_buffering_events);

    debug!("Summarized metrics: {}", summary.one_line());

    summary
}

/// Divide, treating an empty denominator as a zero average
///
/// **Private** - internal helper
fn ratio(total: f64, count: u64) -> f64 {
    if count > 0 {
        total / count as f64
    } else {
        0.0
    }
}

/// Assemble the report written to disk
///
/// **Public** - used by commands to create final output
pub fn build_report(
    aggregation: &Aggregation,
    summary: GlobalSummary,
    skipped_records: u64,
) -> BufferingReport {
    use chrono::Utc;

    BufferingReport {
        version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        sessions: aggregation.session_list(),
        summary,
        diagnostics: aggregation.diagnostics,
        skipped_records,
    }
}

impl GlobalSummary {
    /// Get human-readable one-line summary
    ///
    /// **Public** - for logging and debugging
    pub fn one_line(&self) -> String {
        format!(
            "Sessions: {} | Buffer time: {:.2}s | Intervals: {} | Avg/session: {:.2}s | Avg/event: {:.2}s",
            self.total_sessions_with_buffering,
            self.total_buffer_seconds,
            self.total_buffering_events,
            self.average_buffer_seconds_per_session,
            self.average_buffer_seconds_per_event
        )
    }
}
