//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{APP_NAME, DEFAULT_EPSILON};

/// Reconcile overlapping and duplicate audio sample segments.
#[derive(Debug, Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Suppress informational output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report overlap/duplicate groups and which actions apply.
    Check {
        /// Segment CSV file to inspect.
        file: PathBuf,

        /// Duplicate-matching tolerance in seconds (0 = exact equality).
        #[arg(short, long, value_parser = parse_epsilon, default_value_t = DEFAULT_EPSILON,
              env = "SAMPLETIDY_EPSILON")]
        epsilon: f64,

        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Remove overlapping segments, keeping the earliest per cluster.
    RemoveOverlaps {
        /// Segment CSV file to resolve.
        file: PathBuf,

        /// Output file (default: input with a .tidy.csv suffix).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Remove duplicate segments, keeping one per cluster.
    RemoveDuplicates {
        /// Segment CSV file to resolve.
        file: PathBuf,

        /// Duplicate-matching tolerance in seconds (0 = exact equality).
        #[arg(short, long, value_parser = parse_epsilon, default_value_t = DEFAULT_EPSILON,
              env = "SAMPLETIDY_EPSILON")]
        epsilon: f64,

        /// Output file (default: input with a .tidy.csv suffix).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Merge each overlap cluster into one spanning segment.
    MergeOverlaps {
        /// Segment CSV file to resolve.
        file: PathBuf,

        /// Output file (default: input with a .tidy.csv suffix).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Parse and validate a tolerance value.
fn parse_epsilon(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() || value < 0.0 {
        return Err(format!("tolerance must be non-negative, got {value}"));
    }

    Ok(value)
}
