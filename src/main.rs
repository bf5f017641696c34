//! CLI entry point for golf round statistics reports.
//!
//! Reads round and hole-detail exports, aggregates them by course, and prints
//! per-course statistics, the cross-course summary, or a reference handicap.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use golf_round_stats::aggregator::CourseAggregator;
use golf_round_stats::model::{HoleDetailRecord, RoundRecord};
use golf_round_stats::output::{append_record, print_json, print_pretty, write_json};
use golf_round_stats::parser::{parse_hole_details, parse_hole_details_csv, parse_rounds};
use golf_round_stats::round::{RoundLength, handicap_index};
use std::cmp::Reverse;
use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "golf_round_stats")]
#[command(about = "Course statistics from exported golf rounds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Inputs {
    /// JSON export of round records (falls back to ROUNDS_PATH)
    #[arg(short, long)]
    rounds: Option<String>,

    /// JSON or CSV export of hole details (falls back to HOLES_PATH)
    #[arg(long)]
    holes: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Statistics for a single course
    Course {
        /// Course name, matched exactly
        #[arg(value_name = "NAME")]
        name: String,

        #[command(flatten)]
        inputs: Inputs,

        /// Also write the snapshot as JSON to this file
        #[arg(long)]
        json_out: Option<String>,
    },
    /// Statistics for every course, most played first
    Courses {
        #[command(flatten)]
        inputs: Inputs,

        /// CSV file to append one row per course to
        #[arg(long)]
        csv: Option<String>,
    },
    /// Totals across all courses
    Summary {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Reference handicap index from the 18-hole rounds' differentials
    Handicap {
        #[command(flatten)]
        inputs: Inputs,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/golf_round_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("golf_round_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Course {
            name,
            inputs,
            json_out,
        } => {
            let aggregator = load_aggregator(&inputs)?;
            let Some(stats) = aggregator.course_statistics(&name) else {
                bail!("no rounds recorded for course '{name}'");
            };

            print_pretty(&stats);
            print_json(&stats)?;
            if let Some(path) = json_out {
                write_json(&path, &stats)?;
                info!(path = %path, "Course report written");
            }
        }
        Commands::Courses { inputs, csv } => {
            let aggregator = load_aggregator(&inputs)?;
            let all = aggregator.all_course_statistics();

            for stats in &all {
                info!(
                    course = %stats.course_name,
                    rounds = stats.total_rounds,
                    rounds18 = stats.rounds18,
                    rounds9 = stats.rounds9,
                    avg_score18 = ?stats.avg_score18,
                    "Course"
                );
                if let Some(path) = &csv {
                    append_record(path, stats)?;
                }
            }

            print_json(&all)?;
        }
        Commands::Summary { inputs } => {
            let aggregator = load_aggregator(&inputs)?;
            print_json(&aggregator.summary())?;
        }
        Commands::Handicap { inputs } => {
            let path = input_path(inputs.rounds, "ROUNDS_PATH")?;
            let mut rounds = read_rounds(&path)?;

            // most recent first; undated rounds sort last
            rounds.sort_by_key(|r| Reverse(r.played_at));
            let differentials: Vec<f64> = rounds
                .iter()
                .filter(|r| r.holes_played() == Some(RoundLength::Eighteen))
                .filter_map(|r| r.differential.or_else(|| r.computed_differential()))
                .collect();

            match handicap_index(&differentials) {
                Some(index) => info!(index, rounds = differentials.len(), "Handicap index"),
                None => warn!(
                    rounds = differentials.len(),
                    "Not enough rounds for a handicap index"
                ),
            }
        }
    }

    Ok(())
}

fn input_path(arg: Option<String>, env_key: &str) -> Result<String> {
    match arg {
        Some(path) => Ok(path),
        None => std::env::var(env_key)
            .with_context(|| format!("pass the path on the command line or set {env_key}")),
    }
}

/// Loads both exports and builds the aggregator. Hole details are optional.
#[tracing::instrument(skip_all)]
fn load_aggregator(inputs: &Inputs) -> Result<CourseAggregator> {
    let rounds_path = input_path(inputs.rounds.clone(), "ROUNDS_PATH")?;
    let rounds = read_rounds(&rounds_path)?;

    let holes = match inputs.holes.clone().or_else(|| std::env::var("HOLES_PATH").ok()) {
        Some(path) => read_hole_details(&path)?,
        None => Vec::new(),
    };

    info!(
        rounds = rounds.len(),
        hole_details = holes.len(),
        "Exports loaded"
    );
    Ok(CourseAggregator::from_records(&rounds, &holes))
}

fn read_rounds(path: &str) -> Result<Vec<RoundRecord>> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {path}"))?;
    parse_rounds(&bytes)
}

fn read_hole_details(path: &str) -> Result<Vec<HoleDetailRecord>> {
    if Path::new(path).extension().and_then(|e| e.to_str()) == Some("csv") {
        let file = File::open(path).with_context(|| format!("cannot open {path}"))?;
        parse_hole_details_csv(file)
    } else {
        let bytes = std::fs::read(path).with_context(|| format!("cannot read {path}"))?;
        parse_hole_details(&bytes)
    }
}
