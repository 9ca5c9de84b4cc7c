//! Raw event record parser.
//!
//! Converts loosely typed JSON records from an event source into
//! `RawEvent`s. A bad record is logged and skipped; only a payload
//! that is not a record list at all is an error.

use super::schema::{EventType, RawEvent};
use crate::utils::config::EVENT_FIELD_NAMES;
use crate::utils::error::ParseError;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, warn};
use serde_json::Value;

/// Naive ISO 8601 layout, read as UTC
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Events parsed from a record batch
#[derive(Debug, Clone, Default)]
pub struct ParsedEvents {
    pub events: Vec<RawEvent>,

    /// Number of records rejected as malformed
    pub skipped: u64,
}

/// Parse a batch of raw records
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `raw` - Either a JSON array of records, or an object holding one
///   under `events`, `data` or `records`
///
/// # Errors
/// * `ParseError::InvalidFormat` - The payload holds no record array
pub fn parse_events(raw: &Value) -> Result<ParsedEvents, ParseError> {
    let records = extract_records(raw)?;
    debug!("Parsing {} raw records", records.len());

    let mut parsed = ParsedEvents {
        events: Vec::with_capacity(records.len()),
        skipped: 0,
    };

    for (index, record) in records.iter().enumerate() {
        match parse_record(record) {
            Ok(event) => parsed.events.push(event),
            Err(e) => {
                // A single bad record never aborts the run
                warn!("Skipping record {}: {}", index, e);
                parsed.skipped += 1;
            }
        }
    }

    debug!(
        "Parsed {} events, skipped {} records",
        parsed.events.len(),
        parsed.skipped
    );

    Ok(parsed)
}

/// Locate the record array in a payload
///
/// **Private** - internal helper for parse_events
fn extract_records(raw: &Value) -> Result<&[Value], ParseError> {
    match raw {
        Value::Array(records) => Ok(records),
        Value::Object(obj) => EVENT_FIELD_NAMES
            .iter()
            .find_map(|field| obj.get(*field).and_then(Value::as_array))
            .map(Vec::as_slice)
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Object payload has no record array (expected one of: {})",
                    EVENT_FIELD_NAMES.join(", ")
                ))
            }),
        _ => Err(ParseError::InvalidFormat(
            "Events must be a JSON array or object".to_string(),
        )),
    }
}

/// Parse a single record into an event
///
/// **Public** - exposed for tests and ad-hoc validation
///
/// # Errors
/// * `ParseError::InvalidFormat` - Record is not an object
/// * `ParseError::MissingField` - A required string field is absent
/// * `ParseError::InvalidTimestamp` - Timestamp cannot be interpreted
pub fn parse_record(record: &Value) -> Result<RawEvent, ParseError> {
    let obj = record
        .as_object()
        .ok_or_else(|| ParseError::InvalidFormat(format!("Record is not an object: {}", record)))?;

    let user_id = required_str(obj, "user_id")?;
    let session_id = required_str(obj, "session_id")?;
    let event_type = required_str(obj, "event_type")?;
    let timestamp = obj
        .get("timestamp")
        .ok_or(ParseError::MissingField("timestamp"))
        .and_then(parse_timestamp)?;

    let event_type = match event_type.parse::<EventType>() {
        Ok(kind) => kind,
        Err(never) => match never {},
    };

    Ok(RawEvent::new(user_id, session_id, event_type, timestamp))
}

/// Read a required string field
///
/// **Private** - internal extraction logic
fn required_str<'a>(
    obj: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    obj.get(field)
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingField(field))
}

/// Parse a timestamp from a JSON value
///
/// **Public** - accepts RFC 3339 strings, naive ISO 8601 date-times
/// (read as UTC) and integer Unix seconds
pub fn parse_timestamp(value: &Value) -> Result<DateTime<Utc>, ParseError> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| ParseError::InvalidTimestamp(n.to_string())),
        other => Err(ParseError::InvalidTimestamp(other.to_string())),
    }
}

/// Parse a timestamp string
///
/// **Public** - also used for CLI time-range arguments
pub fn parse_timestamp_str(value: &str) -> Result<DateTime<Utc>, ParseError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, NAIVE_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| ParseError::InvalidTimestamp(format!("{} ({})", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let ts = parse_timestamp_str("2023-10-27T10:00:15Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 10, 27, 10, 0, 15).unwrap());
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let ts = parse_timestamp_str("2023-10-27T12:00:15+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 10, 27, 10, 0, 15).unwrap());
    }

    #[test]
    fn test_parse_timestamp_naive_is_utc() {
        let ts = parse_timestamp_str("2023-10-27T10:00:15").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 10, 27, 10, 0, 15).unwrap());
    }

    #[test]
    fn test_parse_timestamp_epoch_seconds() {
        let ts = parse_timestamp(&json!(1_698_400_815)).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 10, 27, 10, 0, 15).unwrap());
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp_str("yesterday").is_err());
        assert!(parse_timestamp(&json!(true)).is_err());
        assert!(parse_timestamp(&json!(1.5)).is_err());
    }

    #[test]
    fn test_unknown_event_type_is_kept() {
        let event = parse_record(&json!({
            "user_id": "u1",
            "session_id": "s1",
            "event_type": "seek",
            "timestamp": "2023-10-27T10:00:15Z"
        }))
        .unwrap();

        assert_eq!(event.event_type, EventType::Other("seek".to_string()));
        assert!(!event.event_type.is_recognized());
    }

    #[test]
    fn test_missing_field_is_reported() {
        let err = parse_record(&json!({
            "user_id": "u1",
            "event_type": "buffer_start",
            "timestamp": "2023-10-27T10:00:15Z"
        }))
        .unwrap_err();

        assert!(matches!(err, ParseError::MissingField("session_id")));
    }

    #[test]
    fn test_extract_records_from_object() {
        let raw = json!({ "events": [] });
        assert!(extract_records(&raw).unwrap().is_empty());

        let raw = json!({ "rows": [] });
        assert!(extract_records(&raw).is_err());
    }
}
