//! Segment interval model and validity rules.
//!
//! A segment is a half-open time interval `[start, end)` over the audio
//! timeline, carrying an enabled flag, the label of the detector that
//! produced it, and a confidence score. Segments are immutable value data
//! here; the surrounding editor owns creation, mutation, and destruction.

use serde::{Deserialize, Serialize};

use crate::constants::MANUAL_DETECTOR;
use crate::error::{Error, Result};

/// Opaque stable identity of a segment.
///
/// Assigned by the caller (the CLI assigns row order on parse) and preserved
/// across non-destructive operations so the editor can correlate old and new
/// collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SegmentId(pub u64);

impl std::fmt::Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A detected or manually placed sample region on the audio timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Stable identity.
    pub id: SegmentId,
    /// Start time in seconds (inclusive).
    pub start: f64,
    /// End time in seconds (exclusive).
    pub end: f64,
    /// Whether the segment participates in export.
    pub enabled: bool,
    /// Label of the originating detector, or `"manual"` for hand-placed segments.
    pub detector: String,
    /// Detection confidence (0.0-1.0); manual placements carry 1.0.
    pub score: f32,
}

impl Segment {
    /// Create a segment with the given interval and detector label.
    #[must_use]
    pub fn new(id: SegmentId, start: f64, end: f64, detector: impl Into<String>) -> Self {
        Self {
            id,
            start,
            end,
            enabled: true,
            detector: detector.into(),
            score: crate::constants::MANUAL_SCORE,
        }
    }

    /// Whether this segment was placed by hand rather than by a detector.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.detector == MANUAL_DETECTOR
    }

    /// Segment duration in seconds. Positive for any valid segment.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the interval is well formed: finite endpoints and `start < end`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start < self.end
    }
}

/// Validate every segment in a collection before it participates in grouping.
///
/// A segment with `start >= end` or a non-finite endpoint is a programming
/// error on the caller's side; it is reported, never silently repaired, since
/// it would corrupt duration-based group resolution.
///
/// # Errors
///
/// Returns [`Error::InvalidSegment`] for the first malformed segment found.
pub fn validate_segments(segments: &[Segment]) -> Result<()> {
    for segment in segments {
        if !segment.is_valid() {
            return Err(Error::InvalidSegment {
                id: segment.id,
                start: segment.start,
                end: segment.end,
            });
        }
    }
    Ok(())
}
