//! Component payloads and their total order.
//!
//! A payload's variant is fixed at message-construction time; the merge
//! engine never probes types at runtime. Tie-breaks between payloads with
//! equal timestamps use one comparator per variant:
//!
//! - [`PayloadData::None`] is the unique minimum (a removed component loses
//!   every tie)
//! - `Bytes` compare lexicographically
//! - `Number` uses the IEEE-754 total order
//! - `Text` compares by code point (byte order of valid UTF-8)
//!
//! Across variants the fixed rank `None < Bytes < Number < Text` applies.
//! Equality is defined through the same comparison, so order and equality
//! can never disagree, NaN included. Interoperating peers must match this
//! order bit-for-bit or equal-timestamp writes will diverge.

use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The value carried by a component write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PayloadData {
    /// The component was removed. Distinct from "never written", which is
    /// the absence of a cell altogether.
    None,
    /// Raw component bytes as produced by the ECS runtime.
    Bytes(Vec<u8>),
    /// A numeric value.
    Number(f64),
    /// A UTF-8 string value.
    Text(String),
}

impl PayloadData {
    /// Fixed rank used to order payloads of different variants.
    const fn rank(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Bytes(_) => 1,
            Self::Number(_) => 2,
            Self::Text(_) => 3,
        }
    }

    /// Returns true for the removal marker.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl Ord for PayloadData {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bytes(a), Self::Bytes(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for PayloadData {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PayloadData {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PayloadData {}

impl From<Vec<u8>> for PayloadData {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for PayloadData {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<f64> for PayloadData {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for PayloadData {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for PayloadData {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// A timestamped payload stored in one component/entity cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Lamport timestamp of the write that produced this payload.
    pub timestamp: Timestamp,
    /// The written value.
    pub data: PayloadData,
}

impl Payload {
    /// Creates a payload from its parts.
    #[must_use]
    pub fn new(timestamp: Timestamp, data: PayloadData) -> Self {
        Self { timestamp, data }
    }
}
