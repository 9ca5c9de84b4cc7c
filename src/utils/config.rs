//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default timeout for HTTP event sources
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Report path used when `--output` is not given
pub const DEFAULT_REPORT_PATH: &str = "buffer-report.json";

/// Environment variable consulted for the HTTP event source
pub const URL_ENV_VAR: &str = "BUFFER_METRICS_URL";

// Recognized event kinds as they appear on the wire
pub const BUFFER_START: &str = "buffer_start";
pub const BUFFER_END: &str = "buffer_end";

// Field names that may hold the record array in an object payload
// (different exporters wrap their rows differently)
pub const EVENT_FIELD_NAMES: &[&str] = &["events", "data", "records"];
