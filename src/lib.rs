//! Sampletidy - reconcile overlapping and duplicate audio sample segments.
//!
//! The core is a small library over time-interval annotations ("segments"):
//! it clusters transitively overlapping or near-duplicate segments with a
//! union-find grouper and resolves each cluster deterministically
//! (remove-overlaps, remove-duplicates, merge-overlaps). The CLI wraps that
//! core for batch use over segment CSV files; an interactive editor consumes
//! the same library API.

#![warn(missing_docs)]

pub mod actions;
pub mod cli;
pub mod constants;
pub mod error;
pub mod file;
pub mod grouper;
pub mod relation;
pub mod resolver;
pub mod segment;

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use tracing::info;

use actions::{ActionAvailability, action_availability};
use cli::{Cli, Command};
use constants::TIDY_OUTPUT_SUFFIX;
use grouper::{SegmentGroup, find_duplicate_groups, find_overlap_groups};
use segment::Segment;

pub use error::{Error, Result};

/// Main entry point for the sampletidy CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Check {
            file,
            epsilon,
            json,
        } => handle_check(&file, epsilon, json),
        Command::RemoveOverlaps { file, output } => {
            handle_resolve(&file, output, "remove-overlaps", |segments| {
                let groups = find_overlap_groups(segments)?;
                Ok(resolver::remove_all_overlaps(segments, &groups))
            })
        }
        Command::RemoveDuplicates {
            file,
            epsilon,
            output,
        } => handle_resolve(&file, output, "remove-duplicates", move |segments| {
            let groups = find_duplicate_groups(segments, epsilon)?;
            Ok(resolver::remove_all_duplicates(segments, &groups))
        }),
        Command::MergeOverlaps { file, output } => {
            handle_resolve(&file, output, "merge-overlaps", |segments| {
                let groups = find_overlap_groups(segments)?;
                Ok(resolver::merge_all_overlaps(segments, &groups))
            })
        }
    }
}

/// Machine-readable payload for `check --json`.
#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    file: &'a Path,
    segments: usize,
    epsilon: f64,
    overlap_groups: &'a [SegmentGroup],
    duplicate_groups: &'a [SegmentGroup],
    availability: ActionAvailability,
}

/// Execute the `check` command: group both ways and report availability.
fn handle_check(file: &Path, epsilon: f64, json: bool) -> Result<()> {
    let segments = file::parse_segment_file(file)?;
    let overlap_groups = find_overlap_groups(&segments)?;
    let duplicate_groups = find_duplicate_groups(&segments, epsilon)?;
    let availability = action_availability(&overlap_groups, &duplicate_groups);

    if json {
        let report = CheckReport {
            file,
            segments: segments.len(),
            epsilon,
            overlap_groups: &overlap_groups,
            duplicate_groups: &duplicate_groups,
            availability,
        };
        let payload =
            serde_json::to_string_pretty(&report).map_err(|e| Error::JsonSerialize { source: e })?;
        println!("{payload}");
        return Ok(());
    }

    println!(
        "{}: {} segments, {} overlap group(s), {} duplicate group(s) (epsilon {epsilon}s)",
        file.display(),
        segments.len(),
        overlap_groups.len(),
        duplicate_groups.len()
    );
    print_groups("overlap", &overlap_groups, &segments);
    print_groups("duplicate", &duplicate_groups, &segments);
    println!(
        "actions: remove-overlaps={} remove-duplicates={} merge-overlaps={}",
        availability.overlap_removal, availability.duplicate_removal, availability.merge
    );

    Ok(())
}

fn print_groups(relation: &str, groups: &[SegmentGroup], segments: &[Segment]) {
    for (index, group) in groups.iter().enumerate() {
        println!("  {relation} group {}:", index + 1);
        for segment in segments.iter().filter(|s| group.contains(s.id)) {
            println!(
                "    {} [{:.3}s - {:.3}s) {} {}",
                segment.id,
                segment.start,
                segment.end,
                segment.detector,
                if segment.enabled { "enabled" } else { "disabled" }
            );
        }
    }
}

/// Execute a resolver command: parse, resolve with fresh groups, write back.
fn handle_resolve<F>(file: &Path, output: Option<PathBuf>, operation: &str, resolve: F) -> Result<()>
where
    F: FnOnce(&[Segment]) -> Result<Vec<Segment>>,
{
    let segments = file::parse_segment_file(file)?;
    info!(
        "Loaded {} segments from {}",
        segments.len(),
        file.display()
    );

    let resolved = resolve(&segments)?;
    let removed = segments.len() - resolved.len();

    let output_path = output.unwrap_or_else(|| default_output_path(file));
    file::write_segment_file(&output_path, &resolved)?;

    info!(
        "{operation}: {} -> {} segments ({removed} resolved), wrote {}",
        segments.len(),
        resolved.len(),
        output_path.display()
    );
    println!("{}", output_path.display());

    Ok(())
}

/// Default output path: the input filename with the tidy suffix appended.
fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input.file_name().map_or_else(
        || std::ffi::OsString::from("segments"),
        std::ffi::OsStr::to_os_string,
    );
    name.push(TIDY_OUTPUT_SUFFIX);
    input.with_file_name(name)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
