//! Cluster resolution operations.
//!
//! Each resolver consumes the full segment collection plus freshly computed
//! groups and returns a new collection; the input is never mutated, which
//! keeps undo/redo a simple old-vs-new diff for the surrounding editor.
//!
//! All three operations are total over validated input and idempotent once
//! groups are recomputed from their output: a correctly resolved collection
//! has no remaining clusters under the corresponding relation. Groups must be
//! recomputed after every structural edit; member ids that no longer resolve
//! to a segment are ignored.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::constants::MANUAL_DETECTOR;
use crate::grouper::SegmentGroup;
use crate::segment::{Segment, SegmentId};

/// Tie-break ordering for picking the segment a group keeps: earliest start,
/// then earliest end, then smallest id. Endpoints are finite for validated
/// segments, so `total_cmp` agrees with the numeric order.
fn keep_order(a: &Segment, b: &Segment) -> std::cmp::Ordering {
    a.start
        .total_cmp(&b.start)
        .then_with(|| a.end.total_cmp(&b.end))
        .then_with(|| a.id.cmp(&b.id))
}

/// Resolve each group's members against the current collection, skipping
/// ids with no matching segment (stale groups degrade to no-ops, they never
/// fail).
fn group_members<'a>(
    group: &SegmentGroup,
    by_id: &HashMap<SegmentId, &'a Segment>,
) -> Vec<&'a Segment> {
    group
        .members
        .iter()
        .filter_map(|id| by_id.get(id).copied())
        .collect()
}

fn index_by_id(segments: &[Segment]) -> HashMap<SegmentId, &Segment> {
    segments.iter().map(|s| (s.id, s)).collect()
}

/// Remove all overlapping segments, keeping one representative per group.
///
/// For each overlap group, the member with the earliest start survives
/// (ties: earliest end, then smallest id); every other member is discarded.
/// Segments outside any group pass through untouched, in input order.
#[must_use]
pub fn remove_all_overlaps(segments: &[Segment], groups: &[SegmentGroup]) -> Vec<Segment> {
    keep_one_per_group(segments, groups, "overlap")
}

/// Remove all duplicate segments, keeping one representative per group.
///
/// Uses the same keep rule as [`remove_all_overlaps`]: earliest start, then
/// earliest end, then smallest id.
#[must_use]
pub fn remove_all_duplicates(segments: &[Segment], groups: &[SegmentGroup]) -> Vec<Segment> {
    keep_one_per_group(segments, groups, "duplicate")
}

fn keep_one_per_group(
    segments: &[Segment],
    groups: &[SegmentGroup],
    relation: &str,
) -> Vec<Segment> {
    let by_id = index_by_id(segments);
    let mut discard: HashSet<SegmentId> = HashSet::new();

    for group in groups {
        let members = group_members(group, &by_id);
        let Some(keep) = members.iter().min_by(|a, b| keep_order(a, b)) else {
            continue;
        };
        for member in &members {
            if member.id != keep.id {
                discard.insert(member.id);
            }
        }
    }

    debug!(
        relation,
        groups = groups.len(),
        discarded = discard.len(),
        "resolved groups by removal"
    );

    segments
        .iter()
        .filter(|s| !discard.contains(&s.id))
        .cloned()
        .collect()
}

/// Merge each overlap group into a single spanning segment.
///
/// The replacement covers `[min start, max end)` of the group, is enabled iff
/// any member was enabled (a user-visible sample must not silently vanish
/// into a disabled merged region), carries the `"manual"` label if any member
/// does (deliberate placements survive merging), otherwise the label of the
/// earliest-starting member, and keeps the maximum member score. It inherits
/// the identity of the earliest-starting member and takes that member's place
/// in the output order.
#[must_use]
pub fn merge_all_overlaps(segments: &[Segment], groups: &[SegmentGroup]) -> Vec<Segment> {
    let by_id = index_by_id(segments);

    // Merged replacement keyed by the representative's id; all other group
    // members are dropped.
    let mut replacements: HashMap<SegmentId, Segment> = HashMap::new();
    let mut discard: HashSet<SegmentId> = HashSet::new();

    for group in groups {
        let members = group_members(group, &by_id);
        let Some(representative) = members.iter().min_by(|a, b| keep_order(a, b)) else {
            continue;
        };

        let mut merged = Segment {
            id: representative.id,
            start: representative.start,
            end: representative.end,
            enabled: false,
            detector: representative.detector.clone(),
            score: representative.score,
        };
        for member in &members {
            merged.start = merged.start.min(member.start);
            merged.end = merged.end.max(member.end);
            merged.enabled = merged.enabled || member.enabled;
            merged.score = merged.score.max(member.score);
            if member.id != representative.id {
                discard.insert(member.id);
            }
        }
        if members.iter().any(|m| m.is_manual()) {
            merged.detector = MANUAL_DETECTOR.to_string();
        }

        replacements.insert(representative.id, merged);
    }

    debug!(
        groups = groups.len(),
        merged = replacements.len(),
        "merged overlap groups"
    );

    segments
        .iter()
        .filter(|s| !discard.contains(&s.id))
        .map(|s| replacements.get(&s.id).unwrap_or(s).clone())
        .collect()
}
