//! Buffer Metrics CLI
//!
//! Aggregates video streaming buffering events into per-session and
//! platform-wide metrics, and writes them as a JSON report.

use anyhow::Result;
use buffer_metrics::commands::{
    display_schema, display_version, execute_aggregate, validate_args, validate_report_file,
    AggregateArgs, SourceSpec,
};
use buffer_metrics::parser::parse_timestamp_str;
use buffer_metrics::source::TimeRange;
use buffer_metrics::utils::config::{DEFAULT_REPORT_PATH, URL_ENV_VAR};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// Buffer Metrics - buffering analytics for video streaming sessions
#[derive(Parser, Debug)]
#[command(name = "buffer-metrics")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate buffering events into a report
    Aggregate {
        /// JSON file of event records (takes precedence over --url;
        /// built-in sample data if neither is given)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// HTTP endpoint returning event records
        #[arg(short, long, env = URL_ENV_VAR)]
        url: Option<String>,

        /// Only include events at or after this time (RFC 3339)
        #[arg(long, value_parser = parse_time_arg)]
        from: Option<DateTime<Utc>>,

        /// Only include events before this time (RFC 3339)
        #[arg(long, value_parser = parse_time_arg)]
        to: Option<DateTime<Utc>>,

        /// Output path for the JSON report
        #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
        output: PathBuf,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Aggregate {
            input,
            url,
            from,
            to,
            output,
            summary,
        } => {
            let source = match (input, url) {
                (Some(path), _) => SourceSpec::File(path),
                (None, Some(url)) => SourceSpec::Http(url),
                (None, None) => SourceSpec::Sample,
            };

            let args = AggregateArgs {
                source,
                range: TimeRange { from, to },
                output_json: output,
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_aggregate(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Parse a `--from`/`--to` argument
fn parse_time_arg(value: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp_str(value).map_err(|e| e.to_string())
}
