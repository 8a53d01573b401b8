//! Slot Index
//!
//! Positional role within an action's matched tuple. Definition files key
//! per-slot maps by the index as a string ("0", "1", ...), so the key accepts
//! both strings and integers.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Index into an action's matched tuple (0..num_affected)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Slot(pub usize);

impl Slot {
    pub fn index(&self) -> usize {
        self.0
    }

    /// Whether this slot exists in a tuple of `len` tributes
    pub fn fits(&self, len: usize) -> bool {
        self.0 < len
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Slot {
    fn from(index: usize) -> Self {
        Slot(index)
    }
}

struct SlotVisitor;

impl<'de> Visitor<'de> for SlotVisitor {
    type Value = Slot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative slot index or its string form")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Slot, E> {
        usize::try_from(v)
            .map(Slot)
            .map_err(|_| E::custom(format!("slot index {} is too large", v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Slot, E> {
        if v < 0 {
            return Err(E::custom(format!("slot index {} is negative", v)));
        }
        self.visit_u64(v as u64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Slot, E> {
        v.trim()
            .parse::<usize>()
            .map(Slot)
            .map_err(|_| E::custom(format!("invalid slot index: '{}'", v)))
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SlotVisitor)
    }
}
