//! Event sources: where raw buffering records come from.
//!
//! The aggregator never talks to a source directly. Commands fetch a
//! raw payload through an `EventSource`, parse it, narrow it to a
//! `TimeRange`, and only then hand plain events to the core.

pub mod file;
pub mod http;
pub mod sample;

pub use file::FileSource;
pub use http::HttpSource;
pub use sample::SampleSource;

use crate::parser::schema::RawEvent;
use crate::utils::error::SourceError;
use chrono::{DateTime, Utc};

/// Raw record payload from a source (opaque until parsed)
///
/// We keep this as `serde_json::Value` because exporters disagree on
/// the exact layout. The parser handles validation.
pub type RawEventData = serde_json::Value;

/// A provider of raw event records
pub trait EventSource {
    /// Short human-readable description for logs
    fn describe(&self) -> String;

    /// Fetch records, optionally narrowed to a time range
    ///
    /// Sources that cannot filter remotely may return records outside
    /// `range`; callers apply `TimeRange::filter` after parsing.
    fn fetch(&self, range: &TimeRange) -> Result<RawEventData, SourceError>;
}

/// Optional half-open time window `[from, to)` for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// Range that keeps every event
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether a timestamp falls inside the window
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| timestamp >= from)
            && self.to.map_or(true, |to| timestamp < to)
    }

    /// Keep only events inside the window, preserving order
    pub fn filter(&self, events: Vec<RawEvent>) -> Vec<RawEvent> {
        if self.is_unbounded() {
            return events;
        }

        events
            .into_iter()
            .filter(|event| self.contains(event.timestamp))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::EventType;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_unbounded_range_keeps_everything() {
        let range = TimeRange::unbounded();
        assert!(range.contains(at(0)));
        assert!(range.contains(at(i32::MAX as i64)));
    }

    #[test]
    fn test_range_is_half_open() {
        let range = TimeRange {
            from: Some(at(10)),
            to: Some(at(20)),
        };

        assert!(!range.contains(at(9)));
        assert!(range.contains(at(10)));
        assert!(range.contains(at(19)));
        assert!(!range.contains(at(20)));
    }

    #[test]
    fn test_filter_preserves_order() {
        let events = vec![
            RawEvent::new("u", "s", EventType::BufferEnd, at(15)),
            RawEvent::new("u", "s", EventType::BufferStart, at(5)),
            RawEvent::new("u", "s", EventType::BufferStart, at(12)),
        ];
        let range = TimeRange {
            from: Some(at(10)),
            to: None,
        };

        let kept = range.filter(events);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].timestamp, at(15));
        assert_eq!(kept[1].timestamp, at(12));
    }
}
