//! Per-replica component state store.

use crate::TombstoneSet;
use scenesync_types::{ComponentId, EntityId, Payload};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Composite key for one `(component, entity)` cell.
///
/// Packs the component id into the high 32 bits and the entity id into the
/// low 32 bits, replacing a doubly nested map with a single lookup.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CellKey(u64);

impl CellKey {
    /// Builds the key for a component/entity pair.
    #[must_use]
    pub const fn new(component_id: ComponentId, entity_id: EntityId) -> Self {
        Self(((component_id.to_raw() as u64) << 32) | entity_id.to_raw() as u64)
    }

    /// Returns the component half of the key.
    #[must_use]
    pub const fn component_id(self) -> ComponentId {
        ComponentId::new((self.0 >> 32) as u32)
    }

    /// Returns the entity half of the key.
    #[must_use]
    pub const fn entity_id(self) -> EntityId {
        EntityId::from_raw((self.0 & 0xFFFF_FFFF) as u32)
    }
}

/// The mutable per-replica store: one payload per component/entity cell,
/// plus the record of deleted entities.
///
/// Created empty at replica startup and mutated exclusively by
/// [`MergeEngine`](crate::MergeEngine). Every stored payload carries a
/// timestamp of at least 1, and no cell exists for a tombstoned entity
/// incarnation. Snapshot and restore are caller concerns; the type is
/// `Clone`/`Serialize`/`PartialEq` so callers can diff, ship, and reload
/// full states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaState {
    components: HashMap<CellKey, Payload>,
    deleted_entities: TombstoneSet,
}

impl ReplicaState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the payload stored for a cell.
    #[must_use]
    pub fn payload(&self, component_id: ComponentId, entity_id: EntityId) -> Option<&Payload> {
        self.components.get(&CellKey::new(component_id, entity_id))
    }

    /// Number of stored cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.components.len()
    }

    /// Returns true if no cell is stored and nothing was ever deleted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.deleted_entities.is_empty()
    }

    /// Iterates over all stored cells.
    pub fn cells(&self) -> impl Iterator<Item = (CellKey, &Payload)> {
        self.components.iter().map(|(&key, payload)| (key, payload))
    }

    /// The deleted-entity record.
    #[must_use]
    pub fn deleted_entities(&self) -> &TombstoneSet {
        &self.deleted_entities
    }

    pub(crate) fn insert(&mut self, key: CellKey, payload: Payload) {
        self.components.insert(key, payload);
    }

    pub(crate) fn tombstones_mut(&mut self) -> &mut TombstoneSet {
        &mut self.deleted_entities
    }

    /// Drops every cell covered by the tombstone `(number, <= version)`,
    /// across all components.
    ///
    /// Covers the whole version prefix, not just the deleted incarnation:
    /// a replica may still hold a cell for an earlier incarnation it never
    /// saw a deletion for, and leaving it behind would diverge from peers
    /// that processed the deletions in order.
    pub(crate) fn purge_deleted(&mut self, number: u16, version: u16) {
        self.components.retain(|key, _| {
            let id = key.entity_id();
            id.number() != number || id.version() > version
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenesync_types::{PayloadData, Timestamp};

    fn payload(ts: u32, data: &str) -> Payload {
        Payload::new(Timestamp::new(ts), PayloadData::from(data))
    }

    #[test]
    fn cell_key_packs_both_halves() {
        let key = CellKey::new(ComponentId::new(7), EntityId::from_parts(11, 2));
        assert_eq!(key.component_id(), ComponentId::new(7));
        assert_eq!(key.entity_id(), EntityId::from_parts(11, 2));
    }

    #[test]
    fn cell_key_distinguishes_components_and_entities() {
        let a = CellKey::new(ComponentId::new(1), EntityId::from_parts(2, 0));
        let b = CellKey::new(ComponentId::new(2), EntityId::from_parts(1, 0));
        assert_ne!(a, b);
    }

    #[test]
    fn insert_and_lookup() {
        let mut state = ReplicaState::new();
        let key = CellKey::new(ComponentId::new(1), EntityId::from_parts(4, 0));
        state.insert(key, payload(1, "x"));
        assert_eq!(
            state.payload(ComponentId::new(1), EntityId::from_parts(4, 0)),
            Some(&payload(1, "x"))
        );
        assert_eq!(state.cell_count(), 1);
        assert!(!state.is_empty());
    }

    #[test]
    fn purge_removes_the_covered_prefix_only() {
        let mut state = ReplicaState::new();
        for (component, number, version) in [(1u32, 4u16, 0u16), (2, 4, 0), (1, 4, 1), (1, 5, 0)] {
            state.insert(
                CellKey::new(ComponentId::new(component), EntityId::from_parts(number, version)),
                payload(1, "x"),
            );
        }

        state.purge_deleted(4, 0);

        // both components of incarnation (4,0) are gone
        assert!(state.payload(ComponentId::new(1), EntityId::from_parts(4, 0)).is_none());
        assert!(state.payload(ComponentId::new(2), EntityId::from_parts(4, 0)).is_none());
        // the later incarnation and the unrelated slot survive
        assert!(state.payload(ComponentId::new(1), EntityId::from_parts(4, 1)).is_some());
        assert!(state.payload(ComponentId::new(1), EntityId::from_parts(5, 0)).is_some());
    }

    #[test]
    fn snapshot_roundtrip_preserves_equality() {
        let mut state = ReplicaState::new();
        state.insert(
            CellKey::new(ComponentId::new(3), EntityId::from_parts(1, 0)),
            payload(2, "snapshot"),
        );
        state.tombstones_mut().insert(9, 1);

        let json = serde_json::to_string(&state).unwrap();
        let back: ReplicaState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert_eq!(back.cells().count(), 1);
        assert!(back.deleted_entities().contains(9, 0));
    }
}
