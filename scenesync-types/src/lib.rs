//! Core wire types for scenesync.
//!
//! This crate defines the types exchanged between replicas:
//! - Bit-packed entity identifiers (slot number + generation) and opaque
//!   component identifiers
//! - Lamport timestamps for last-writer-wins ordering
//! - The payload sum type with its fixed total order
//! - The tagged wire message enum and its JSON codec
//!
//! Everything that travels between peers lives here so that the bit layout
//! and field names stay in one place. The merge algebra itself belongs in
//! `scenesync-crdt`.

mod entity;
mod message;
mod payload;
mod timestamp;

pub use entity::{ComponentId, EntityId};
pub use message::CrdtMessage;
pub use payload::{Payload, PayloadData};
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wire type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
