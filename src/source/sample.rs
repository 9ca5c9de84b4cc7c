//! Built-in sample data standing in for a database query.

use super::{EventSource, RawEventData, TimeRange};
use crate::utils::error::SourceError;
use log::debug;
use serde_json::json;

/// Source that returns a fixed set of streaming events
///
/// Three sessions on 2023-10-27: `session_A` buffers twice (3s and 2s),
/// `session_B` and `session_C` once each (5s). Records are deliberately
/// out of timestamp order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl SampleSource {
    pub fn new() -> Self {
        Self
    }
}

impl EventSource for SampleSource {
    fn describe(&self) -> String {
        "built-in sample events".to_string()
    }

    fn fetch(&self, _range: &TimeRange) -> Result<RawEventData, SourceError> {
        debug!("Loading built-in sample events");

        Ok(json!([
            { "user_id": "user_1", "session_id": "session_A", "event_type": "buffer_start", "timestamp": "2023-10-27T10:00:15Z" },
            { "user_id": "user_2", "session_id": "session_B", "event_type": "buffer_start", "timestamp": "2023-10-27T10:01:05Z" },
            { "user_id": "user_1", "session_id": "session_A", "event_type": "buffer_end",   "timestamp": "2023-10-27T10:00:18Z" },
            { "user_id": "user_3", "session_id": "session_C", "event_type": "buffer_start", "timestamp": "2023-10-27T10:02:30Z" },
            { "user_id": "user_2", "session_id": "session_B", "event_type": "buffer_end",   "timestamp": "2023-10-27T10:01:10Z" },
            { "user_id": "user_1", "session_id": "session_A", "event_type": "buffer_start", "timestamp": "2023-10-27T10:05:00Z" },
            { "user_id": "user_3", "session_id": "session_C", "event_type": "buffer_end",   "timestamp": "2023-10-27T10:02:35Z" },
            { "user_id": "user_1", "session_id": "session_A", "event_type": "buffer_end",   "timestamp": "2023-10-27T10:05:02Z" }
        ]))
    }
}
