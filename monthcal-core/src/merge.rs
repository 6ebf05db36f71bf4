//! Merging externally sourced candidates into the canonical event set.

use std::collections::HashSet;

use crate::event::{DedupKey, Event};

/// Result of a merge, with counts for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub merged: Vec<Event>,
    pub accepted: usize,
    pub skipped: usize,
}

/// Merge `candidates` into `existing`.
///
/// Every existing event is kept in its original order. A candidate is
/// appended only when no existing event shares its (title, day) key.
/// Candidates are not checked against each other.
pub fn merge(existing: &[Event], candidates: &[Event]) -> Vec<Event> {
    merge_with_report(existing, candidates).merged
}

pub fn merge_with_report(existing: &[Event], candidates: &[Event]) -> MergeReport {
    let taken: HashSet<DedupKey> = existing.iter().map(Event::dedup_key).collect();

    let mut merged = existing.to_vec();
    let mut skipped = 0;

    for candidate in candidates {
        if taken.contains(&candidate.dedup_key()) {
            skipped += 1;
        } else {
            merged.push(candidate.clone());
        }
    }

    MergeReport {
        accepted: merged.len() - existing.len(),
        merged,
        skipped,
    }
}
