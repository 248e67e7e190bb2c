//! Last-Writer-Wins element-set CRDT core for scenesync.
//!
//! Synchronizes per-entity, per-component state across untrusted,
//! unordered, duplicating network links without central coordination:
//!
//! - [`TombstoneSet`]: grow-only record of deleted entity generations,
//!   compacted to one high-water mark per slot
//! - [`ReplicaState`]: the per-replica cell store plus the tombstones
//! - [`MergeEngine`]: originates local events and folds inbound messages
//!   into the state
//!
//! [`MergeEngine::process_message`] is **commutative**, **associative**,
//! and **idempotent**: once every message has reached every peer, all
//! replicas hold identical state regardless of delivery order, duplication,
//! or delay. The engine is single-threaded and synchronous; run one
//! instance per logical thread, and leave retries, broadcast fan-out, and
//! persistence to the transport around it.

mod engine;
mod state;
mod tombstones;

pub use engine::{MergeEngine, ProcessMessageResult};
pub use state::{CellKey, ReplicaState};
pub use tombstones::TombstoneSet;
