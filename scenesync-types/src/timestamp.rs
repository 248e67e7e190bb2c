//! Lamport timestamps for last-writer-wins ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Lamport counter attached to every component write.
///
/// [`Timestamp::ZERO`] means "never written"; every stored payload carries
/// a timestamp of at least 1. Local writes advance strictly past the
/// highest timestamp the replica has observed for the cell, whether that
/// came from a local write or a merged-in remote one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u32);

impl Timestamp {
    /// The "never written" timestamp.
    pub const ZERO: Self = Self(0);

    /// Creates a timestamp from a raw counter value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Returns the next timestamp. Saturates at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
