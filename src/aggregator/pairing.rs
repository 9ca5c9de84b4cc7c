//! Reconstruct buffering intervals from a flat event stream.
//!
//! Events are grouped by session, ordered by time, and paired by a
//! two-state machine per session:
//!
//! ```text
//!            buffer_start                 buffer_start (abandons previous)
//!   Idle ─────────────────► Open ◄──────────────┐
//!    ▲                       │  └───────────────┘
//!    └───────────────────────┘
//!            buffer_end (closes interval)
//! ```
//!
//! An end while `Idle` is an orphan and is dropped. A session still
//! `Open` after its last event has an unterminated start, also dropped.

use crate::parser::schema::{AggregationDiagnostics, EventType, RawEvent, SessionAggregate};
use crate::utils::error::AggregateError;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Result of pairing a batch of events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// One entry per session with at least one closed interval,
    /// keyed (and therefore ordered) by session id
    pub sessions: BTreeMap<String, SessionAggregate>,

    pub diagnostics: AggregationDiagnostics,
}

impl Aggregation {
    /// Session aggregates in session id order
    pub fn session_list(&self) -> Vec<SessionAggregate> {
        self.sessions.values().cloned().collect()
    }
}

/// Pairing state of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairingState {
    /// No buffering interval in progress
    Idle,
    /// A start has been seen and not yet closed
    Open { started_at: DateTime<Utc> },
}

/// Running totals while scanning one session
#[derive(Debug)]
struct SessionScan<'a> {
    session_id: &'a str,
    state: PairingState,
    total_buffer_seconds: f64,
    event_count: u64,
}

impl<'a> SessionScan<'a> {
    fn new(session_id: &'a str) -> Self {
        Self {
            session_id,
            state: PairingState::Idle,
            total_buffer_seconds: 0.0,
            event_count: 0,
        }
    }

    /// Feed the next event (in timestamp order) into the state machine
    fn apply(
        &mut self,
        event: &RawEvent,
        diagnostics: &mut AggregationDiagnostics,
    ) -> Result<(), AggregateError> {
        match (&event.event_type, self.state) {
            (EventType::BufferStart, PairingState::Open { started_at }) => {
                debug!(
                    "Session {}: start at {} abandoned by start at {}",
                    self.session_id, started_at, event.timestamp
                );
                diagnostics.abandoned_starts += 1;
                self.state = PairingState::Open {
                    started_at: event.timestamp,
                };
            }
            (EventType::BufferStart, PairingState::Idle) => {
                self.state = PairingState::Open {
                    started_at: event.timestamp,
                };
            }
            (EventType::BufferEnd, PairingState::Open { started_at }) => {
                let seconds = interval_seconds(self.session_id, started_at, event.timestamp)?;
                self.total_buffer_seconds += seconds;
                self.event_count += 1;
                self.state = PairingState::Idle;
            }
            (EventType::BufferEnd, PairingState::Idle) => {
                warn!(
                    "Found 'buffer_end' for session {} at {} without a matching 'buffer_start', skipping",
                    self.session_id, event.timestamp
                );
                diagnostics.orphan_ends += 1;
            }
            // Partitioning already removed these
            (EventType::Other(_), _) => {}
        }

        Ok(())
    }

    /// Close the scan, yielding an aggregate if any interval completed
    fn finish(self, diagnostics: &mut AggregationDiagnostics) -> Option<SessionAggregate> {
        if let PairingState::Open { started_at } = self.state {
            debug!(
                "Session {}: start at {} never ended, dropping",
                self.session_id, started_at
            );
            diagnostics.unterminated_starts += 1;
        }

        (self.event_count > 0).then(|| SessionAggregate {
            session_id: self.session_id.to_string(),
            total_buffer_seconds: self.total_buffer_seconds,
            event_count: self.event_count,
        })
    }
}

/// Aggregate raw events into per-session buffering totals
///
/// **Public** - main entry point for interval pairing
///
/// # Arguments
/// * `events` - Events in any order; the slice is not modified
///
/// # Returns
/// Per-session aggregates plus counters for dropped events
///
/// # Errors
/// * `AggregateError::NegativeInterval` - A closed interval ended before
///   it started, which means the ordering step is broken
///
/// # Algorithm
/// 1. Partition by session id, skipping unrecognized event kinds
/// 2. Stable-sort each partition by timestamp (ties keep input order)
/// 3. Run the pairing state machine over each partition
/// 4. Keep sessions with at least one closed interval
pub fn aggregate_buffering(events: &[RawEvent]) -> Result<Aggregation, AggregateError> {
    debug!("Aggregating {} raw events", events.len());

    let mut diagnostics = AggregationDiagnostics::default();
    let partitions = partition_by_session(events, &mut diagnostics);
    let mut sessions = BTreeMap::new();

    for (session_id, mut session_events) in partitions {
        // `sort_by_key` is stable, which is the tie-break we rely on
        session_events.sort_by_key(|event| event.timestamp);

        let mut scan = SessionScan::new(session_id);
        for event in session_events {
            scan.apply(event, &mut diagnostics)?;
        }

        if let Some(aggregate) = scan.finish(&mut diagnostics) {
            sessions.insert(aggregate.session_id.clone(), aggregate);
        }
    }

    debug!(
        "Aggregated {} sessions with buffering ({} events dropped)",
        sessions.len(),
        diagnostics.total_dropped()
    );

    Ok(Aggregation {
        sessions,
        diagnostics,
    })
}

/// Group events by session id, preserving input order within a group
///
/// **Private** - internal helper for aggregate_buffering
fn partition_by_session<'a>(
    events: &'a [RawEvent],
    diagnostics: &mut AggregationDiagnostics,
) -> BTreeMap<&'a str, Vec<&'a RawEvent>> {
    let mut partitions: BTreeMap<&str, Vec<&RawEvent>> = BTreeMap::new();

    for event in events {
        if !event.event_type.is_recognized() {
            debug!(
                "Skipping event with unrecognized type '{}' in session {}",
                event.event_type, event.session_id
            );
            diagnostics.unrecognized_events += 1;
            continue;
        }

        partitions
            .entry(event.session_id.as_str())
            .or_default()
            .push(event);
    }

    partitions
}

/// Duration of a closed interval in seconds
///
/// **Private** - internal helper; refuses negative intervals
fn interval_seconds(
    session_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<f64, AggregateError> {
    let seconds = (end - start).num_milliseconds() as f64 / 1_000.0;

    if seconds < 0.0 {
        return Err(AggregateError::NegativeInterval {
            session_id: session_id.to_string(),
            seconds,
        });
    }

    Ok(seconds)
}
