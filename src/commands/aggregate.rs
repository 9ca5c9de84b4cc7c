//! Aggregate command implementation.
//!
//! The aggregate command:
//! 1. Fetches raw records from an event source
//! 2. Parses them into events (skipping malformed records)
//! 3. Narrows events to the requested time range
//! 4. Pairs buffering intervals per session
//! 5. Summarizes global metrics
//! 6. Writes the JSON report

use crate::aggregator::{aggregate_buffering, build_report, summarize};
use crate::output::{render_text_summary, write_report};
use crate::parser::parse_events;
use crate::parser::schema::BufferingReport;
use crate::source::{EventSource, FileSource, HttpSource, SampleSource, TimeRange};
use crate::utils::config::DEFAULT_REPORT_PATH;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Where the aggregate command reads events from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// Built-in sample events
    Sample,
    /// JSON file on disk
    File(PathBuf),
    /// HTTP endpoint returning JSON
    Http(String),
}

/// Arguments for the aggregate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AggregateArgs {
    pub source: SourceSpec,

    /// Optional time window applied before pairing
    pub range: TimeRange,

    /// Output path for the JSON report
    pub output_json: PathBuf,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AggregateArgs {
    fn default() -> Self {
        Self {
            source: SourceSpec::Sample,
            range: TimeRange::unbounded(),
            output_json: PathBuf::from(DEFAULT_REPORT_PATH),
            print_summary: false,
        }
    }
}

/// Execute the aggregate command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was written, so callers can inspect it
///
/// # Errors
/// * Source connection or read failures
/// * Unparseable payloads
/// * Internal pairing invariant violations
/// * File write errors
pub fn execute_aggregate(args: AggregateArgs) -> Result<BufferingReport> {
    let start_time = Instant::now();

    let source = build_source(&args.source)?;
    let report = run_pipeline(source.as_ref(), &args.range)?;

    info!("Writing report...");
    write_report(&report, &args.output_json).context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.output_json.display());

    if args.print_summary {
        println!("\n{}", render_text_summary(&report));
    }

    let elapsed = start_time.elapsed();
    info!("Aggregation completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Run fetch, parse, filter, aggregate and summarize against any source
///
/// **Public** - lets callers inject their own `EventSource`
pub fn run_pipeline(source: &dyn EventSource, range: &TimeRange) -> Result<BufferingReport> {
    info!("Step 1/4: Fetching events from {}...", source.describe());
    let raw = source
        .fetch(range)
        .with_context(|| format!("Failed to fetch events from {}", source.describe()))?;

    info!("Step 2/4: Parsing event records...");
    let parsed = parse_events(&raw).context("Failed to parse event records")?;
    let events = range.filter(parsed.events);

    debug!(
        "{} events in range, {} records skipped",
        events.len(),
        parsed.skipped
    );

    info!("Step 3/4: Pairing buffering intervals...");
    let aggregation =
        aggregate_buffering(&events).context("Buffering interval pairing failed")?;

    info!("Step 4/4: Summarizing metrics...");
    let summary = summarize(aggregation.sessions.values());
    info!("Summary: {}", summary.one_line());

    Ok(build_report(&aggregation, summary, parsed.skipped))
}

/// Instantiate the event source named by the arguments
///
/// **Private** - internal helper for execute_aggregate
fn build_source(spec: &SourceSpec) -> Result<Box<dyn EventSource>> {
    Ok(match spec {
        SourceSpec::Sample => Box::new(SampleSource::new()),
        SourceSpec::File(path) => Box::new(FileSource::new(path)),
        SourceSpec::Http(url) => {
            Box::new(HttpSource::new(url).context("Failed to create HTTP client")?)
        }
    })
}

/// Validate aggregate arguments
///
/// **Public** - can be called before execute_aggregate for early validation
pub fn validate_args(args: &AggregateArgs) -> Result<()> {
    match &args.source {
        SourceSpec::Sample => {}
        SourceSpec::File(path) => {
            if path.as_os_str().is_empty() {
                anyhow::bail!("Input path cannot be empty");
            }
        }
        SourceSpec::Http(url) => {
            if url.is_empty() {
                anyhow::bail!("Source URL cannot be empty");
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("Source URL must start with http:// or https://");
            }
        }
    }

    if let (Some(from), Some(to)) = (args.range.from, args.range.to) {
        if from >= to {
            anyhow::bail!("--from ({}) must be earlier than --to ({})", from, to);
        }
    }

    if args.output_json.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    Ok(())
}
