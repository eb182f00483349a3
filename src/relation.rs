//! Pairwise segment relation tests.
//!
//! Two relations drive grouping: temporal overlap and near-duplication.
//! Overlap is tested exactly on the half-open intervals; duplication is
//! tested through a caller-supplied tolerance that absorbs floating-point
//! rounding accumulated through repeated edits and exports.

use crate::segment::Segment;

/// Whether two segments intersect with positive measure.
///
/// Touching endpoints (`a.end == b.start`) are NOT an overlap; adjacent
/// samples must never be grouped. No tolerance is applied here.
#[must_use]
pub fn overlaps(a: &Segment, b: &Segment) -> bool {
    a.start < b.end && b.start < a.end
}

/// Whether two segments are duplicates within `epsilon` seconds per endpoint.
///
/// True iff both start times and both end times differ by at most `epsilon`.
/// An `epsilon` of zero degenerates to exact equality. Callers validate that
/// `epsilon` is non-negative before grouping.
#[must_use]
pub fn is_duplicate(a: &Segment, b: &Segment, epsilon: f64) -> bool {
    (a.start - b.start).abs() <= epsilon && (a.end - b.end).abs() <= epsilon
}
