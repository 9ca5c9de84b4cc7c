use anyhow::Result;
use std::path::PathBuf;
use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    if report.sessions.len() as u64 != report.summary.total_sessions_with_buffering {
        anyhow::bail!(
            "Report lists {} sessions but its summary counts {}",
            report.sessions.len(),
            report.summary.total_sessions_with_buffering
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Sessions with buffering: {}", report.summary.total_sessions_with_buffering);
    println!("  Buffering events: {}", report.summary.total_buffering_events);
    println!("  Total buffer time: {:.2}s", report.summary.total_buffer_seconds);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Buffer Metrics Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string           - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string      - ISO 8601 timestamp");
        println!("  sessions: array           - Sessions with completed buffering, by session id");
        println!("    session_id: string      - Session identifier");
        println!("    total_buffer_seconds: number - Sum of interval durations");
        println!("    event_count: number     - Completed buffering intervals");
        println!("  summary: object           - Platform-wide metrics");
        println!("    total_sessions_with_buffering: number");
        println!("    total_buffer_seconds: number");
        println!("    total_buffering_events: number");
        println!("    average_buffer_seconds_per_session: number - 0 when no sessions");
        println!("    average_buffer_seconds_per_event: number   - 0 when no events");
        println!("  diagnostics: object       - Events dropped from the metrics");
        println!("    unrecognized_events, orphan_ends, abandoned_starts, unterminated_starts");
        println!("  skipped_records: number   - Malformed records rejected by the parser");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Buffer Metrics v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Aggregates video streaming buffering events into session and platform metrics.");
}
