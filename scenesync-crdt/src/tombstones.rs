//! Grow-only record of deleted entity generations.
//!
//! Slots are reused in strictly increasing version order, so deleting
//! version `v` of a slot implies every earlier incarnation is already
//! unreachable. One high-water mark per slot therefore covers the whole
//! prefix, bounding tombstone memory by the number of distinct slots ever
//! deleted rather than the number of deletions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Compacted G-Set over `(slot number, generation)` pairs.
///
/// Marks never decrease, so the set only grows; deletion is final.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TombstoneSet {
    marks: HashMap<u16, u16>,
}

impl TombstoneSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `version` of slot `number` as deleted.
    ///
    /// Returns true iff the high-water mark for the slot advanced. A
    /// version at or below the recorded mark is already covered and leaves
    /// the set untouched.
    pub fn insert(&mut self, number: u16, version: u16) -> bool {
        match self.marks.get_mut(&number) {
            Some(max) if *max >= version => false,
            Some(max) => {
                *max = version;
                true
            }
            None => {
                self.marks.insert(number, version);
                true
            }
        }
    }

    /// Returns true iff `version` of slot `number` is deleted.
    #[must_use]
    pub fn contains(&self, number: u16, version: u16) -> bool {
        self.marks.get(&number).is_some_and(|max| *max >= version)
    }

    /// Number of slots with at least one recorded deletion.
    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns true if no deletion was ever recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Lazily yields every deleted `(number, version)` pair.
    ///
    /// Expands each high-water mark to the full `0..=max` prefix. Meant for
    /// full-state comparison and snapshots, not the merge hot path; the
    /// iterator is finite and a fresh one is produced per call.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.marks
            .iter()
            .flat_map(|(&number, &max)| (0..=max).map(move |version| (number, version)))
    }

    /// Merges another tombstone set into this one (per-slot max).
    ///
    /// Commutative, associative, and idempotent, like every merge in this
    /// crate.
    pub fn merge(&mut self, other: &Self) {
        for (&number, &max) in &other.marks {
            self.insert(number, max);
        }
    }
}
