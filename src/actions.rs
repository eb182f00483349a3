//! Action availability reporting.
//!
//! The surrounding editor enables or disables its resolution actions from
//! this predicate. It must be recomputed from fresh groups after every
//! structural edit; stale availability is a correctness bug, since a
//! resolver invoked on an empty group set is a no-op the user did not ask
//! for.

use serde::Serialize;

use crate::grouper::SegmentGroup;

/// Which cluster-resolution operations currently apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionAvailability {
    /// At least one overlap group exists.
    pub overlap_removal: bool,
    /// At least one duplicate group exists.
    pub duplicate_removal: bool,
    /// Merge applies whenever overlap removal does.
    pub merge: bool,
}

/// Report which resolvers apply to the given freshly computed groups.
#[must_use]
pub fn action_availability(
    overlap_groups: &[SegmentGroup],
    duplicate_groups: &[SegmentGroup],
) -> ActionAvailability {
    ActionAvailability {
        overlap_removal: !overlap_groups.is_empty(),
        duplicate_removal: !duplicate_groups.is_empty(),
        merge: !overlap_groups.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouper::{find_duplicate_groups, find_overlap_groups};
    use crate::segment::{Segment, SegmentId};

    fn seg(id: u64, start: f64, end: f64) -> Segment {
        Segment::new(SegmentId(id), start, end, "detector-a")
    }

    #[test]
    fn test_nothing_available_for_clean_collection() {
        let segments = vec![seg(0, 0.0, 5.0), seg(1, 10.0, 15.0)];
        let overlaps = find_overlap_groups(&segments).unwrap();
        let duplicates = find_duplicate_groups(&segments, 0.0).unwrap();
        let availability = action_availability(&overlaps, &duplicates);
        assert!(!availability.overlap_removal);
        assert!(!availability.duplicate_removal);
        assert!(!availability.merge);
    }

    #[test]
    fn test_overlap_enables_removal_and_merge() {
        let segments = vec![seg(0, 0.0, 5.0), seg(1, 4.0, 9.0)];
        let overlaps = find_overlap_groups(&segments).unwrap();
        let duplicates = find_duplicate_groups(&segments, 0.0).unwrap();
        let availability = action_availability(&overlaps, &duplicates);
        assert!(availability.overlap_removal);
        assert!(availability.merge);
        assert!(!availability.duplicate_removal);
    }

    #[test]
    fn test_duplicates_enable_duplicate_removal_only() {
        // Exact duplicates also overlap; use near-duplicates that do not.
        let segments = vec![seg(0, 0.0, 5.0), seg(1, 10.0, 15.0), seg(2, 10.0, 15.0)];
        let duplicates = find_duplicate_groups(&segments, 0.0).unwrap();
        let availability = action_availability(&[], &duplicates);
        assert!(availability.duplicate_removal);
        assert!(!availability.overlap_removal);
        assert!(!availability.merge);
    }
}
