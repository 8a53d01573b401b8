//! Arena Simulation Engine Library
//!
//! Tributes are ECS entities; each round the scheduler draws actions from a
//! pool, matches them against untouched living tributes, applies their
//! effects and resolves deaths and loot.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod actions;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod output;
pub mod setup;
pub mod systems;

pub use components::*;

pub use actions::{load_definitions, parse_definitions, Action, ActionPools, Definitions, LoadError, Slot};
pub use config::{Config, ConfigError, EngineConfig, SimulationConfig};
pub use error::ArenaError;
pub use setup::{build_world, load_roster, parse_roster, RosterError};
pub use systems::{run_day, run_game, run_round, GameClock, GameResult, History};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
