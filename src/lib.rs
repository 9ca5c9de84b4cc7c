//! Buffer Metrics
//!
//! Aggregates buffering events from a video streaming platform into
//! per-session and platform-wide performance metrics.
//!
//! The core is two pure steps:
//! - [`aggregator::aggregate_buffering`] pairs `buffer_start`/`buffer_end`
//!   events into closed intervals per session
//! - [`aggregator::summarize`] reduces the sessions into global totals
//!   and averages
//!
//! Event sources, record parsing, report output and the `buffer-metrics`
//! CLI are thin layers around that core.
//!
//! ```ignore
//! let aggregation = aggregate_buffering(&events)?;
//! let summary = summarize(aggregation.sessions.values());
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod source;
pub mod utils;
