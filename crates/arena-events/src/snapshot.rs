//! Snapshot Types
//!
//! Read-only views of the roster for narrative rendering and analysis.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// Full state of one tribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TributeSnapshot {
    pub name: String,
    pub district: u8,
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
    pub alive: bool,
    pub health: i32,
    pub hunger: i32,
    pub thirst: i32,
    pub combat_power: i32,
    pub stealth: i32,
    pub vision: i32,
    pub charisma: i32,
    /// Item names in acquisition order
    #[serde(default)]
    pub inventory: Vec<String>,
    /// Other tribute name -> relationship label
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relations: BTreeMap<String, String>,
    pub kill_count: u32,
}

/// Final placing of a tribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1 is the winner (or the last to fall)
    pub place: usize,
    pub name: String,
    pub district: u8,
    pub kill_count: u32,
    pub alive: bool,
}

/// Complete game state at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub snapshot_id: String,
    pub day: u32,
    pub triggered_by: String,
    /// Living tributes in roster order
    pub living: Vec<TributeSnapshot>,
    /// Fallen tributes in elimination order, most recent last
    pub fallen: Vec<TributeSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

impl GameSnapshot {
    pub fn new(snapshot_id: &str, day: u32, triggered_by: &str) -> Self {
        Self {
            snapshot_id: snapshot_id.to_string(),
            day,
            triggered_by: triggered_by.to_string(),
            living: Vec::new(),
            fallen: Vec::new(),
            winner: None,
        }
    }

    /// Living tributes first (roster order), then the fallen from most to
    /// least recent.
    pub fn standings(&self) -> Vec<Standing> {
        self.living
            .iter()
            .chain(self.fallen.iter().rev())
            .enumerate()
            .map(|(i, t)| Standing {
                place: i + 1,
                name: t.name.clone(),
                district: t.district,
                kill_count: t.kill_count,
                alive: t.alive,
            })
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<&TributeSnapshot> {
        self.living
            .iter()
            .chain(self.fallen.iter())
            .find(|t| t.name == name)
    }
}
