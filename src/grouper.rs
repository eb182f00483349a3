//! Transitive segment clustering.
//!
//! Overlap and duplicate relations are not pairwise-independent: three or
//! more segments can chain into one cluster even when not every pair is
//! directly related (A overlaps B, B overlaps C, A clear of C). Grouping
//! therefore computes connected components over the pairwise relation with a
//! union-find structure instead of any pairwise-only shortcut.
//!
//! Pairwise comparison is the straightforward O(n²) approach. Segment counts
//! are bounded by interactive editing scale, not bulk data; that ceiling is
//! deliberate.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::relation::{is_duplicate, overlaps};
use crate::segment::{Segment, SegmentId, validate_segments};

/// One maximal cluster of mutually (transitively) related segments.
///
/// Serves both overlap and duplicate grouping; the relation is determined by
/// which `find_*` function produced the group. Groups are disjoint, contain
/// at least two members, and carry no identity of their own: they are
/// recomputed fresh on every call. Members are sorted by id and the group
/// list is sorted by smallest member id, so the result is independent of the
/// input collection's iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentGroup {
    /// Identities of the member segments, sorted ascending.
    pub members: Vec<SegmentId>,
}

impl SegmentGroup {
    /// Number of segments in this cluster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cluster has no members. Never true for groups produced
    /// by the `find_*` functions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the given segment belongs to this cluster.
    #[must_use]
    pub fn contains(&self, id: SegmentId) -> bool {
        self.members.binary_search(&id).is_ok()
    }
}

/// Disjoint-set forest over segment indices, with path compression and
/// union by rank.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// Find all maximal clusters of transitively overlapping segments.
///
/// Segments that overlap nothing are excluded rather than emitted as
/// singleton groups; a segment related to nothing needs no action.
///
/// # Errors
///
/// Returns [`Error::InvalidSegment`] if any segment fails interval
/// validation.
pub fn find_overlap_groups(segments: &[Segment]) -> Result<Vec<SegmentGroup>> {
    validate_segments(segments)?;
    let groups = cluster_by(segments, overlaps);
    debug!(
        segments = segments.len(),
        groups = groups.len(),
        "computed overlap groups"
    );
    Ok(groups)
}

/// Find all maximal clusters of transitively near-duplicate segments.
///
/// `epsilon` is the per-endpoint tolerance in seconds; zero means exact
/// start/end equality.
///
/// # Errors
///
/// Returns [`Error::NegativeTolerance`] if `epsilon` is negative, or
/// [`Error::InvalidSegment`] if any segment fails interval validation.
pub fn find_duplicate_groups(segments: &[Segment], epsilon: f64) -> Result<Vec<SegmentGroup>> {
    if !epsilon.is_finite() || epsilon < 0.0 {
        return Err(Error::NegativeTolerance { value: epsilon });
    }
    validate_segments(segments)?;
    let groups = cluster_by(segments, |a, b| is_duplicate(a, b, epsilon));
    debug!(
        segments = segments.len(),
        groups = groups.len(),
        epsilon,
        "computed duplicate groups"
    );
    Ok(groups)
}

/// Union-find clustering over every unordered pair satisfying `related`.
fn cluster_by<F>(segments: &[Segment], related: F) -> Vec<SegmentGroup>
where
    F: Fn(&Segment, &Segment) -> bool,
{
    let mut forest = UnionFind::new(segments.len());

    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            if related(&segments[i], &segments[j]) {
                forest.union(i, j);
            }
        }
    }

    // Collect component members keyed by root index.
    let mut components: HashMap<usize, Vec<SegmentId>> = HashMap::new();
    for (index, segment) in segments.iter().enumerate() {
        let root = forest.find(index);
        components.entry(root).or_default().push(segment.id);
    }

    let mut groups: Vec<SegmentGroup> = components
        .into_values()
        .filter(|members| members.len() > 1)
        .map(|mut members| {
            members.sort_unstable();
            SegmentGroup { members }
        })
        .collect();

    // Deterministic output order regardless of hash iteration.
    groups.sort_unstable_by_key(|group| group.members[0]);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(id: u64, start: f64, end: f64) -> Segment {
        Segment::new(SegmentId(id), start, end, "detector-a")
    }

    fn member_ids(group: &SegmentGroup) -> Vec<u64> {
        group.members.iter().map(|id| id.0).collect()
    }

    #[test]
    fn test_union_find_chains() {
        let mut forest = UnionFind::new(5);
        forest.union(0, 1);
        forest.union(1, 2);
        forest.union(3, 4);
        assert_eq!(forest.find(0), forest.find(2));
        assert_eq!(forest.find(3), forest.find(4));
        assert_ne!(forest.find(0), forest.find(4));
    }

    #[test]
    fn test_union_find_idempotent_union() {
        let mut forest = UnionFind::new(3);
        forest.union(0, 1);
        forest.union(0, 1);
        forest.union(1, 0);
        assert_eq!(forest.find(0), forest.find(1));
        assert_ne!(forest.find(0), forest.find(2));
    }

    #[test]
    fn test_empty_collection_yields_no_groups() {
        assert!(find_overlap_groups(&[]).unwrap().is_empty());
        assert!(find_duplicate_groups(&[], 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_no_relations_yields_no_groups() {
        let segments = vec![seg(0, 0.0, 5.0), seg(1, 10.0, 15.0), seg(2, 20.0, 25.0)];
        assert!(find_overlap_groups(&segments).unwrap().is_empty());
    }

    #[test]
    fn test_overlap_chain_forms_single_group() {
        // A overlaps B, B overlaps C, A clear of C: one transitive cluster.
        let segments = vec![
            seg(0, 0.0, 10.0),
            seg(1, 8.0, 20.0),
            seg(2, 18.0, 30.0),
            seg(3, 40.0, 50.0),
        ];
        let groups = find_overlap_groups(&segments).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(member_ids(&groups[0]), vec![0, 1, 2]);
    }

    #[test]
    fn test_nesting_forms_single_group() {
        // Outer contains two segments that are clear of each other.
        let segments = vec![seg(0, 0.0, 30.0), seg(1, 2.0, 5.0), seg(2, 10.0, 12.0)];
        let groups = find_overlap_groups(&segments).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(member_ids(&groups[0]), vec![0, 1, 2]);
    }

    #[test]
    fn test_touching_boundary_never_grouped() {
        let segments = vec![seg(0, 0.0, 5.0), seg(1, 5.0, 10.0)];
        assert!(find_overlap_groups(&segments).unwrap().is_empty());
    }

    #[test]
    fn test_multiple_disjoint_groups() {
        let segments = vec![
            seg(0, 0.0, 4.0),
            seg(1, 3.0, 6.0),
            seg(2, 100.0, 110.0),
            seg(3, 105.0, 112.0),
            seg(4, 200.0, 201.0),
        ];
        let groups = find_overlap_groups(&segments).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(member_ids(&groups[0]), vec![0, 1]);
        assert_eq!(member_ids(&groups[1]), vec![2, 3]);
    }

    #[test]
    fn test_order_independence() {
        let mut segments = vec![
            seg(0, 0.0, 10.0),
            seg(1, 8.0, 20.0),
            seg(2, 18.0, 30.0),
            seg(3, 40.0, 50.0),
            seg(4, 39.0, 41.0),
        ];
        let baseline = find_overlap_groups(&segments).unwrap();

        // Every rotation of the input yields the same groups.
        for _ in 0..segments.len() {
            segments.rotate_left(1);
            let rotated = find_overlap_groups(&segments).unwrap();
            assert_eq!(rotated, baseline);
        }
        segments.reverse();
        assert_eq!(find_overlap_groups(&segments).unwrap(), baseline);
    }

    #[test]
    fn test_duplicate_groups_with_epsilon() {
        let segments = vec![
            seg(0, 10.000, 20.000),
            seg(1, 10.003, 19.998),
            seg(2, 50.0, 60.0),
        ];
        let grouped = find_duplicate_groups(&segments, 0.005).unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(member_ids(&grouped[0]), vec![0, 1]);

        let tight = find_duplicate_groups(&segments, 0.001).unwrap();
        assert!(tight.is_empty());
    }

    #[test]
    fn test_duplicate_chain_through_tolerance() {
        // 0~1 and 1~2 within epsilon, 0 and 2 just outside: still one cluster.
        let segments = vec![
            seg(0, 10.000, 20.000),
            seg(1, 10.004, 20.004),
            seg(2, 10.008, 20.008),
        ];
        let groups = find_duplicate_groups(&segments, 0.005).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(member_ids(&groups[0]), vec![0, 1, 2]);
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let segments = vec![seg(0, 0.0, 1.0)];
        let result = find_duplicate_groups(&segments, -0.001);
        assert!(matches!(result, Err(Error::NegativeTolerance { .. })));
    }

    #[test]
    fn test_invalid_segment_rejected_before_grouping() {
        let segments = vec![seg(0, 0.0, 1.0), seg(1, 5.0, 5.0)];
        assert!(matches!(
            find_overlap_groups(&segments),
            Err(Error::InvalidSegment { .. })
        ));
        assert!(matches!(
            find_duplicate_groups(&segments, 0.0),
            Err(Error::InvalidSegment { .. })
        ));
    }

    #[test]
    fn test_group_contains() {
        let group = SegmentGroup {
            members: vec![SegmentId(1), SegmentId(4), SegmentId(9)],
        };
        assert!(group.contains(SegmentId(4)));
        assert!(!group.contains(SegmentId(5)));
        assert_eq!(group.len(), 3);
        assert!(!group.is_empty());
    }
}
