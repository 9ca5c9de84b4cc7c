use buffer_metrics::aggregator::{aggregate_buffering, build_report, summarize};
use buffer_metrics::output::{read_report, report_to_string, write_report};
use buffer_metrics::parser::{EventType, RawEvent};
use buffer_metrics::utils::config::SCHEMA_VERSION;
use buffer_metrics::utils::OutputError;
use chrono::{TimeZone, Utc};

fn sample_report() -> buffer_metrics::parser::BufferingReport {
    let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let events = vec![
        RawEvent::new("u", "A", EventType::BufferStart, t0),
        RawEvent::new("u", "A", EventType::BufferEnd, t0 + chrono::Duration::seconds(4)),
        RawEvent::new("u", "B", EventType::BufferEnd, t0),
    ];

    let aggregation = aggregate_buffering(&events).unwrap();
    let summary = summarize(aggregation.sessions.values());
    build_report(&aggregation, summary, 2)
}

#[test]
fn test_report_json_field_names() {
    let json = report_to_string(&sample_report()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["version"], SCHEMA_VERSION);
    assert_eq!(value["sessions"][0]["session_id"], "A");
    assert_eq!(value["sessions"][0]["total_buffer_seconds"], 4.0);
    assert_eq!(value["sessions"][0]["event_count"], 1);
    assert_eq!(value["summary"]["total_sessions_with_buffering"], 1);
    assert_eq!(value["summary"]["average_buffer_seconds_per_event"], 4.0);
    assert_eq!(value["diagnostics"]["orphan_ends"], 1);
    assert_eq!(value["skipped_records"], 2);
}

#[test]
fn test_write_then_read_report() {
    let report = sample_report();
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("report.json");

    write_report(&report, &path).unwrap();
    let loaded = read_report(&path).unwrap();

    assert_eq!(loaded.sessions, report.sessions);
    assert_eq!(loaded.diagnostics, report.diagnostics);
    assert_eq!(loaded.generated_at, report.generated_at);
}

#[test]
fn test_write_report_to_directory_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = write_report(&sample_report(), temp_dir.path());

    assert!(matches!(result, Err(OutputError::InvalidPath(_))));
}

#[test]
fn test_read_report_rejects_non_report_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("events.json");
    std::fs::write(&path, "[]").unwrap();

    assert!(matches!(
        read_report(&path),
        Err(OutputError::SerializationFailed(_))
    ));
}
