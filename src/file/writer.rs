//! Segment file writing.
//!
//! Writes a resolved segment collection back to CSV in the same column
//! layout the parser accepts, so output files round-trip as input.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::Error;
use crate::segment::Segment;

/// Output record for CSV serialization.
#[derive(Debug, Serialize)]
struct SegmentRow<'a> {
    #[serde(rename = "Start (s)")]
    start: f64,
    #[serde(rename = "End (s)")]
    end: f64,
    #[serde(rename = "Detector")]
    detector: &'a str,
    #[serde(rename = "Enabled")]
    enabled: bool,
    #[serde(rename = "Score")]
    score: f32,
}

/// Write a segment collection to a CSV file.
///
/// Creates the parent directory if needed. Identities are not persisted;
/// the parser reassigns them from row order.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written.
pub fn write_segment_file(path: &Path, segments: &[Segment]) -> Result<(), Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::OutputDirCreateFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| Error::SegmentWrite {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    for segment in segments {
        writer
            .serialize(SegmentRow {
                start: segment.start,
                end: segment.end,
                detector: &segment.detector,
                enabled: segment.enabled,
                score: segment.score,
            })
            .map_err(|e| Error::SegmentWrite {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;
    }

    writer.flush().map_err(|e| Error::SegmentWrite {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    Ok(())
}
