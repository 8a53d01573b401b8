//! Snapshot Generation
//!
//! Read-only views of the world for narrative rendering and analysis.

use bevy_ecs::prelude::*;
use std::fs;
use std::path::Path;

use arena_events::{generate_snapshot_id, GameSnapshot, TributeSnapshot};

use crate::components::{Rankings, Roster, Tribute};
use crate::systems::GameClock;

/// Resource to track snapshot generation
#[derive(Resource, Debug)]
pub struct SnapshotGenerator {
    next_snapshot_id: u64,
}

impl Default for SnapshotGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotGenerator {
    pub fn new() -> Self {
        Self { next_snapshot_id: 1 }
    }

    pub fn next_id(&mut self) -> String {
        let id = generate_snapshot_id(self.next_snapshot_id);
        self.next_snapshot_id += 1;
        id
    }

    pub fn snapshot_count(&self) -> u64 {
        self.next_snapshot_id - 1
    }
}

/// Copy one tribute into its serializable view
pub fn snapshot_tribute(tribute: &Tribute) -> TributeSnapshot {
    TributeSnapshot {
        name: tribute.name.clone(),
        district: tribute.district,
        gender: tribute.gender.clone(),
        portrait: tribute.portrait.clone(),
        alive: tribute.alive,
        health: tribute.health,
        hunger: tribute.hunger,
        thirst: tribute.thirst,
        combat_power: tribute.combat_power,
        stealth: tribute.stealth,
        vision: tribute.vision,
        charisma: tribute.charisma,
        inventory: tribute.inventory.iter().map(|item| item.name.clone()).collect(),
        relations: tribute.relations.clone(),
        kill_count: tribute.kill_count,
    }
}

/// Living tributes in roster order
pub fn living_roster(world: &World) -> Vec<TributeSnapshot> {
    world
        .resource::<Roster>()
        .entities
        .iter()
        .filter_map(|entity| world.get::<Tribute>(*entity))
        .filter(|tribute| tribute.is_alive())
        .map(snapshot_tribute)
        .collect()
}

/// Fallen tributes in elimination order, most recent last
pub fn fallen(world: &World) -> Vec<TributeSnapshot> {
    world
        .resource::<Rankings>()
        .fallen()
        .iter()
        .filter_map(|entity| world.get::<Tribute>(*entity))
        .map(snapshot_tribute)
        .collect()
}

/// Generate a complete game snapshot
pub fn generate_snapshot(world: &mut World, triggered_by: &str) -> GameSnapshot {
    let snapshot_id = world
        .get_resource_or_insert_with(SnapshotGenerator::new)
        .next_id();
    let day = world.resource::<GameClock>().day;

    let mut snapshot = GameSnapshot::new(&snapshot_id, day, triggered_by);
    snapshot.living = living_roster(world);
    snapshot.fallen = fallen(world);
    if let [winner] = snapshot.living.as_slice() {
        snapshot.winner = Some(winner.name.clone());
    }
    snapshot
}

/// Write a snapshot as pretty-printed JSON, creating parent directories
pub fn write_snapshot(path: impl AsRef<Path>, snapshot: &GameSnapshot) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    tracing::info!("Wrote snapshot {} to {}", snapshot.snapshot_id, path.display());
    Ok(())
}
