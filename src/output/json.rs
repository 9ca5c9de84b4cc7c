//! JSON report output writer.
//!
//! Writes BufferingReport structs to JSON files with proper formatting.

use crate::parser::schema::BufferingReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &BufferingReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a report to a pretty JSON string
///
/// **Public** - useful for tests and piping to stdout
pub fn report_to_string(report: &BufferingReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report).map_err(OutputError::SerializationFailed)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a report from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::ReadFailed` - File read error
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<BufferingReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::ReadFailed)?;

    let report: BufferingReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, {} sessions",
        report.version,
        report.sessions.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{AggregationDiagnostics, GlobalSummary, SessionAggregate};
    use tempfile::NamedTempFile;

    fn create_test_report() -> BufferingReport {
        BufferingReport {
            version: "1.0.0".to_string(),
            generated_at: "2024-01-01T00:00:00Z".to_string(),
            sessions: vec![SessionAggregate {
                session_id: "session_A".to_string(),
                total_buffer_seconds: 5.0,
                event_count: 2,
            }],
            summary: GlobalSummary {
                total_sessions_with_buffering: 1,
                total_buffer_seconds: 5.0,
                total_buffering_events: 2,
                average_buffer_seconds_per_session: 5.0,
                average_buffer_seconds_per_event: 2.5,
            },
            diagnostics: AggregationDiagnostics::default(),
            skipped_records: 0,
        }
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.sessions, report.sessions);
        assert_eq!(loaded.summary, report.summary);
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&create_test_report(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_read_missing_report_is_read_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = read_report(temp_dir.path().join("missing.json"));

        let err = result.unwrap_err();
        assert!(matches!(err, OutputError::ReadFailed(_)));
        assert!(err.to_string().starts_with("Failed to read file"));
    }

    #[test]
    fn test_report_without_diagnostics_still_loads() {
        let json = r#"{
            "version": "1.0.0",
            "generated_at": "2024-01-01T00:00:00Z",
            "sessions": [],
            "summary": {
                "total_sessions_with_buffering": 0,
                "total_buffer_seconds": 0.0,
                "total_buffering_events": 0,
                "average_buffer_seconds_per_session": 0.0,
                "average_buffer_seconds_per_event": 0.0
            }
        }"#;
        let report: BufferingReport = serde_json::from_str(json).unwrap();

        assert_eq!(report.diagnostics, AggregationDiagnostics::default());
        assert_eq!(report.skipped_records, 0);
    }
}
