//! Engine Systems
//!
//! Matching, effect application, loot resolution, and the round and game
//! drivers built on them.

pub mod effects;
pub mod game;
pub mod loot;
pub mod matcher;
pub mod round;
pub mod select;

pub use effects::{apply_effects, apply_slot_effects};
pub use game::{day_phase, is_over, living, run_day, run_game, GameClock, GameResult};
pub use loot::{distribute_loot, resolve_lethality, Resolution};
pub use matcher::{requirements_met, slot_satisfied};
pub use round::{play_round, run_round, History};
pub use select::{sample_tuple, weighted_random_choice};
