//! World Setup
//!
//! Builds an ECS world from validated definitions, a roster and the tuning
//! config.

pub mod tributes;

pub use tributes::{load_roster, parse_roster, RosterError, TributeRecord};

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::actions::Definitions;
use crate::components::{Rankings, Roster, Tribute};
use crate::config::Config;
use crate::output::SnapshotGenerator;
use crate::systems::{GameClock, History};
use crate::SimRng;

/// Create a world holding every resource the engine needs, with the tributes
/// spawned in roster order. The random source is seeded from
/// `config.simulation.seed`.
pub fn build_world(definitions: Definitions, tributes: Vec<Tribute>, config: &Config) -> World {
    let mut world = World::new();

    world.insert_resource(SimRng(SmallRng::seed_from_u64(config.simulation.seed)));
    world.insert_resource(config.simulation.clone());
    world.insert_resource(config.engine.clone());
    world.insert_resource(definitions.items);
    world.insert_resource(definitions.pools);
    world.insert_resource(Rankings::new());
    world.insert_resource(History::new());
    world.insert_resource(GameClock::default());
    world.insert_resource(SnapshotGenerator::new());

    let roster = spawn_tributes(&mut world, tributes);
    world.insert_resource(roster);

    world
}

/// Spawn one entity per tribute and return them in spawn order
pub fn spawn_tributes(world: &mut World, tributes: Vec<Tribute>) -> Roster {
    let mut roster = Roster::new();
    for tribute in tributes {
        roster.push(world.spawn(tribute).id());
    }
    roster
}
