//! Wire messages exchanged between replicas.
//!
//! Messages form a tagged union; the discriminator travels as a `type`
//! field. Kinds introduced by newer peers land on [`CrdtMessage::Unknown`]
//! instead of failing the decode, so a replica never chokes on traffic it
//! does not understand. Structurally malformed input is rejected at the
//! codec boundary and never reaches the merge engine.

use crate::{ComponentId, EntityId, PayloadData, Result, Timestamp};
use serde::{Deserialize, Serialize};

/// A replication message, delivered at-least-once and in any order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CrdtMessage {
    /// A component write for one entity cell.
    ComponentData {
        component_id: ComponentId,
        entity_id: EntityId,
        timestamp: Timestamp,
        data: PayloadData,
    },
    /// A whole-entity deletion.
    DeleteEntity { entity_id: EntityId },
    /// A message kind this replica does not recognize.
    #[serde(other)]
    Unknown,
}

impl CrdtMessage {
    /// Encodes the message as JSON for the RPC transport.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a message from JSON.
    ///
    /// Unrecognized message kinds decode to [`CrdtMessage::Unknown`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The entity this message targets, if any.
    #[must_use]
    pub fn entity_id(&self) -> Option<EntityId> {
        match self {
            Self::ComponentData { entity_id, .. } | Self::DeleteEntity { entity_id } => {
                Some(*entity_id)
            }
            Self::Unknown => None,
        }
    }
}
