//! Identifier types shared across the scenesync core.
//!
//! Entity ids are 32-bit compounds of a reusable slot number (low 16 bits)
//! and a generation counter (high 16 bits) incremented every time a slot is
//! reused after deletion. The layout must be bit-exact with every peer
//! implementation to interoperate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-bit compound entity identifier.
///
/// Two ids with the same slot number but different versions refer to
/// logically distinct entity incarnations occupying the same slot. Stale
/// messages aimed at an earlier incarnation can therefore never affect a
/// later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// Builds an id from a slot number and a generation counter.
    #[must_use]
    pub const fn from_parts(number: u16, version: u16) -> Self {
        Self((number as u32) | ((version as u32) << 16))
    }

    /// Wraps a raw 32-bit id as received from the wire.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw 32-bit wire representation.
    #[must_use]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Returns the reusable slot index (low 16 bits).
    #[must_use]
    pub const fn number(self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    /// Returns the generation counter (high 16 bits).
    #[must_use]
    pub const fn version(self) -> u16 {
        ((self.0 >> 16) & 0xFFFF) as u16
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.number(), self.version())
    }
}

impl From<u32> for EntityId {
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.to_raw()
    }
}

/// Opaque identifier for a component kind.
///
/// The core never interprets component semantics; the id only routes
/// payloads to the right cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(u32);

impl ComponentId {
    /// Wraps a raw component id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw component id.
    #[must_use]
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ComponentId {
    fn from(raw: u32) -> Self {
        Self::new(raw)
    }
}
