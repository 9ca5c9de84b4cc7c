//! Plain-text rendering of a report for the terminal.

use crate::parser::schema::BufferingReport;

/// Render the per-session block and the high-level summary
///
/// **Public** - used by the aggregate command's `--summary` flag
pub fn render_text_summary(report: &BufferingReport) -> String {
    let mut lines = vec!["--- Aggregated Metrics per Session ---".to_string()];

    if report.sessions.is_empty() {
        lines.push("No sessions with completed buffering intervals.".to_string());
    }
    for session in &report.sessions {
        lines.push(format!("Session ID: {}", session.session_id));
        lines.push(format!(
            "  Total Buffer Time: {:.2} seconds",
            session.total_buffer_seconds
        ));
        lines.push(format!("  Number of Buffering Events: {}", session.event_count));
        lines.push("-".repeat(30));
    }

    let summary = &report.summary;
    lines.push(String::new());
    lines.push("--- High-level Summary Metrics ---".to_string());
    lines.push(format!(
        "Total Sessions with Buffering: {}",
        summary.total_sessions_with_buffering
    ));
    lines.push(format!(
        "Total Buffer Time (All Sessions): {:.2} seconds",
        summary.total_buffer_seconds
    ));
    lines.push(format!(
        "Total Buffering Events (All Sessions): {}",
        summary.total_buffering_events
    ));
    lines.push(format!(
        "Average Buffer Time per Session: {:.2} seconds",
        summary.average_buffer_seconds_per_session
    ));
    lines.push(format!(
        "Average Buffer Time per Event: {:.2} seconds",
        summary.average_buffer_seconds_per_event
    ));

    let dropped = report.diagnostics.total_dropped() + report.skipped_records;
    if dropped > 0 {
        lines.push(String::new());
        lines.push(format!(
            "Dropped: {} malformed, {} unrecognized, {} orphan ends, {} abandoned starts, {} unterminated starts",
            report.skipped_records,
            report.diagnostics.unrecognized_events,
            report.diagnostics.orphan_ends,
            report.diagnostics.abandoned_starts,
            report.diagnostics.unterminated_starts
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{AggregationDiagnostics, SessionAggregate};

    fn report(sessions: Vec<SessionAggregate>, diagnostics: AggregationDiagnostics) -> BufferingReport {
        BufferingReport {
            version: "1.0.0".to_string(),
            generated_at: "2024-01-01T00:00:00Z".to_string(),
            summary: crate::aggregator::summarize(&sessions),
            sessions,
            diagnostics,
            skipped_records: 0,
        }
    }

    #[test]
    fn test_render_sessions_and_summary() {
        let text = render_text_summary(&report(
            vec![SessionAggregate {
                session_id: "session_A".to_string(),
                total_buffer_seconds: 5.0,
                event_count: 2,
            }],
            AggregationDiagnostics::default(),
        ));

        assert!(text.contains("Session ID: session_A"));
        assert!(text.contains("Total Buffer Time: 5.00 seconds"));
        assert!(text.contains("Average Buffer Time per Event: 2.50 seconds"));
        assert!(!text.contains("Dropped:"));
    }

    #[test]
    fn test_render_empty_report_with_drops() {
        let diagnostics = AggregationDiagnostics {
            orphan_ends: 1,
            ..Default::default()
        };
        let text = render_text_summary(&report(vec![], diagnostics));

        assert!(text.contains("No sessions with completed buffering intervals."));
        assert!(text.contains("Total Sessions with Buffering: 0"));
        assert!(text.contains("1 orphan ends"));
    }

    #[test]
    fn test_render_line_layout() {
        let text = render_text_summary(&report(
            vec![SessionAggregate {
                session_id: "s".to_string(),
                total_buffer_seconds: 1.0,
                event_count: 1,
            }],
            AggregationDiagnostics::default(),
        ));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "--- Aggregated Metrics per Session ---");
        assert_eq!(lines[1], "Session ID: s");
        assert_eq!(lines[4], "-".repeat(30));
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "--- High-level Summary Metrics ---");
        assert_eq!(lines.len(), 12);
    }
}
