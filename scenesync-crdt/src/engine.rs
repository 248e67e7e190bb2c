//! The CRDT merge engine.
//!
//! One engine drives one replica. Local writes and deletions advance the
//! replica's view and produce outbound messages for broadcast; every
//! inbound message is folded into the state through
//! [`MergeEngine::process_message`]. Processing is commutative,
//! associative, and idempotent, so replicas converge no matter how the
//! network reorders, duplicates, or delays delivery.

use crate::state::CellKey;
use crate::ReplicaState;
use scenesync_types::{ComponentId, CrdtMessage, EntityId, Payload, PayloadData, Timestamp};
use std::cmp::Ordering;
use tracing::debug;

/// Classification of one processed message.
///
/// The `StateOutdated*` values signal that the sender is behind; callers
/// may answer them with a corrective rebroadcast built by
/// [`MergeEngine::correction_event`]. Every other value is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum ProcessMessageResult {
    /// The remote write carried a newer timestamp and was adopted.
    StateUpdatedTimestamp,
    /// The remote write was older than the stored payload and was
    /// discarded.
    StateOutdatedTimestamp,
    /// The message changed nothing: a duplicate write or an unknown kind.
    NoChanges,
    /// Equal timestamps; the stored payload won the tie-break and the
    /// remote write was discarded.
    StateOutdatedData,
    /// Equal timestamps; the remote payload won the tie-break and was
    /// adopted.
    StateUpdatedData,
    /// The target entity incarnation is already deleted; the message was
    /// discarded.
    EntityWasDeleted,
    /// The entity was deleted by this message.
    EntityDeleted,
}

/// The per-replica CRDT engine.
///
/// Single-threaded and synchronous: every operation is a non-blocking
/// mutation of in-memory maps, with no I/O and no suspension points. Run
/// one engine per logical thread or event loop; concurrent replicas are
/// independent instances that converge through message exchange alone.
#[derive(Debug, Clone, Default)]
pub struct MergeEngine {
    state: ReplicaState,
}

impl MergeEngine {
    /// Creates an engine over an empty replica state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Originates a local component write.
    ///
    /// Returns `None` when the entity incarnation is already deleted;
    /// writes against tombstoned ids are suppressed entirely. Otherwise
    /// the write is stored with a timestamp strictly past the highest this
    /// replica has observed for the cell, local or merged-in remote, and
    /// the message to broadcast is returned.
    pub fn create_component_data_event(
        &mut self,
        component_id: ComponentId,
        entity_id: EntityId,
        data: PayloadData,
    ) -> Option<CrdtMessage> {
        if self
            .state
            .deleted_entities()
            .contains(entity_id.number(), entity_id.version())
        {
            debug!(%entity_id, "local write suppressed: entity deleted");
            return None;
        }

        let timestamp = self
            .state
            .payload(component_id, entity_id)
            .map_or(Timestamp::ZERO, |payload| payload.timestamp)
            .next();
        self.state.insert(
            CellKey::new(component_id, entity_id),
            Payload::new(timestamp, data.clone()),
        );

        Some(CrdtMessage::ComponentData {
            component_id,
            entity_id,
            timestamp,
            data,
        })
    }

    /// Originates a local entity deletion.
    ///
    /// Records the tombstone, purges every component payload stored for
    /// the incarnation (and any earlier one of the same slot), and returns
    /// the deletion message to broadcast. Deletion is final: the
    /// incarnation can never be resurrected.
    pub fn create_delete_entity_event(&mut self, entity_id: EntityId) -> CrdtMessage {
        self.state
            .tombstones_mut()
            .insert(entity_id.number(), entity_id.version());
        self.state
            .purge_deleted(entity_id.number(), entity_id.version());
        debug!(%entity_id, "entity deleted locally");
        CrdtMessage::DeleteEntity { entity_id }
    }

    /// Folds one inbound message into the replica state.
    ///
    /// Deterministic, commutative, associative, and idempotent: any
    /// interleaving of the same message multiset converges to the same
    /// state. Never fails; unknown message kinds degrade to
    /// [`ProcessMessageResult::NoChanges`].
    pub fn process_message(&mut self, message: &CrdtMessage) -> ProcessMessageResult {
        match message {
            CrdtMessage::ComponentData {
                component_id,
                entity_id,
                timestamp,
                data,
            } => self.process_component_data(*component_id, *entity_id, *timestamp, data),
            CrdtMessage::DeleteEntity { entity_id } => self.process_delete_entity(*entity_id),
            CrdtMessage::Unknown => ProcessMessageResult::NoChanges,
        }
    }

    fn process_component_data(
        &mut self,
        component_id: ComponentId,
        entity_id: EntityId,
        timestamp: Timestamp,
        data: &PayloadData,
    ) -> ProcessMessageResult {
        if self
            .state
            .deleted_entities()
            .contains(entity_id.number(), entity_id.version())
        {
            return ProcessMessageResult::EntityWasDeleted;
        }

        let key = CellKey::new(component_id, entity_id);
        let Some(local) = self.state.payload(component_id, entity_id) else {
            self.state.insert(key, Payload::new(timestamp, data.clone()));
            return ProcessMessageResult::StateUpdatedTimestamp;
        };

        match timestamp.cmp(&local.timestamp) {
            Ordering::Greater => {
                self.state.insert(key, Payload::new(timestamp, data.clone()));
                ProcessMessageResult::StateUpdatedTimestamp
            }
            Ordering::Less => {
                debug!(
                    %entity_id,
                    component = component_id.to_raw(),
                    "stale remote write discarded"
                );
                ProcessMessageResult::StateOutdatedTimestamp
            }
            Ordering::Equal => match data.cmp(&local.data) {
                Ordering::Equal => ProcessMessageResult::NoChanges,
                Ordering::Greater => {
                    self.state.insert(key, Payload::new(timestamp, data.clone()));
                    ProcessMessageResult::StateUpdatedData
                }
                Ordering::Less => ProcessMessageResult::StateOutdatedData,
            },
        }
    }

    fn process_delete_entity(&mut self, entity_id: EntityId) -> ProcessMessageResult {
        if !self
            .state
            .tombstones_mut()
            .insert(entity_id.number(), entity_id.version())
        {
            return ProcessMessageResult::EntityWasDeleted;
        }
        self.state
            .purge_deleted(entity_id.number(), entity_id.version());
        debug!(%entity_id, "entity deleted by remote");
        ProcessMessageResult::EntityDeleted
    }

    /// Rebuilds the broadcast message for a cell from the stored payload.
    ///
    /// Does not advance the clock. Transports call this to answer a
    /// `StateOutdated*` result with a correction carrying the winning
    /// payload. Returns `None` when the cell holds nothing.
    #[must_use]
    pub fn correction_event(
        &self,
        component_id: ComponentId,
        entity_id: EntityId,
    ) -> Option<CrdtMessage> {
        self.state
            .payload(component_id, entity_id)
            .map(|payload| CrdtMessage::ComponentData {
                component_id,
                entity_id,
                timestamp: payload.timestamp,
                data: payload.data.clone(),
            })
    }

    /// Pure lookup of the payload stored for a cell.
    #[must_use]
    pub fn element_set_state(
        &self,
        component_id: ComponentId,
        entity_id: EntityId,
    ) -> Option<&Payload> {
        self.state.payload(component_id, entity_id)
    }

    /// The live replica state, for snapshotting and equality checks.
    ///
    /// The shared reference keeps callers from mutating outside the
    /// engine.
    #[must_use]
    pub fn state(&self) -> &ReplicaState {
        &self.state
    }

    /// Replaces the replica state with an externally restored snapshot.
    pub fn load_state(&mut self, state: ReplicaState) {
        self.state = state;
    }

    /// Consumes the engine, releasing its state for external snapshotting.
    #[must_use]
    pub fn into_state(self) -> ReplicaState {
        self.state
    }
}
