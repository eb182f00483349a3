//! Segment file parsing.
//!
//! Parses segment CSV files into the core model. Uses the `csv` crate for
//! robust parsing (quoting, UTF-8 BOM, embedded commas). Row order assigns
//! segment identity.

use std::path::Path;

use serde::Deserialize;

use crate::Error;
use crate::constants::score;
use crate::segment::{Segment, SegmentId};

/// Internal record for CSV deserialization.
#[derive(Debug, Deserialize)]
struct SegmentRecord {
    #[serde(rename = "Start (s)")]
    start: f64,
    #[serde(rename = "End (s)")]
    end: f64,
    #[serde(rename = "Detector")]
    detector: String,
    #[serde(rename = "Enabled")]
    enabled: bool,
    #[serde(rename = "Score")]
    score: f32,
}

/// Parse a segment file and return the segment collection.
///
/// Expects CSV with columns: Start (s), End (s), Detector, Enabled, Score.
/// Each row becomes one segment; its row index becomes its identity.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - Required columns are missing
/// - Values cannot be parsed
/// - A row has `end <= start` or a non-finite endpoint
///
/// Returns `Ok(vec![])` if the file contains no segments (empty or
/// header-only).
pub fn parse_segment_file(path: &Path) -> Result<Vec<Segment>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::SegmentParseFailed {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut segments = Vec::new();

    for (line_num, result) in reader.deserialize::<SegmentRecord>().enumerate() {
        let record = result.map_err(|e| Error::InvalidSegmentFormat {
            message: format!("line {}: {e}", line_num + 2),
        })?;

        // Validate time range at the boundary, never coerce.
        if !record.start.is_finite() || !record.end.is_finite() || record.end <= record.start {
            return Err(Error::InvalidSegmentFormat {
                message: format!(
                    "line {}: interval [{}, {}) must have finite endpoints and start < end",
                    line_num + 2,
                    record.start,
                    record.end
                ),
            });
        }

        if !(score::MIN..=score::MAX).contains(&record.score) {
            return Err(Error::InvalidSegmentFormat {
                message: format!(
                    "line {}: score must be between {} and {}, got {}",
                    line_num + 2,
                    score::MIN,
                    score::MAX,
                    record.score
                ),
            });
        }

        segments.push(Segment {
            id: SegmentId(line_num as u64),
            start: record.start,
            end: record.end,
            enabled: record.enabled,
            detector: record.detector,
            score: record.score,
        });
    }

    Ok(segments)
}
