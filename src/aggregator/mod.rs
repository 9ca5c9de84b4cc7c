//! Aggregation of buffering events into session and global metrics.
//!
//! This module transforms parsed events into:
//! - Closed buffering intervals per session
//! - Per-session totals and interval counts
//! - Platform-wide totals and averages

pub mod pairing;
pub mod metrics;

// Re-export main types and functions
pub use pairing::{aggregate_buffering, Aggregation};
pub use metrics::{build_report, summarize};
