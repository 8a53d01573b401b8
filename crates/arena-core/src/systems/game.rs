//! Game Driver
//!
//! Day N plays a day round (the feast round on the feast day) and then a
//! night round. The game ends when at most one tribute is alive or the day
//! cap is reached.

use bevy_ecs::prelude::*;

use arena_events::{Phase, RoundSummary};

use crate::actions::ActionPools;
use crate::components::{Roster, Tribute};
use crate::config::SimulationConfig;

use super::round::run_round;

/// Resource tracking the current day (0 before the first day)
#[derive(Resource, Debug, Clone, Default)]
pub struct GameClock {
    pub day: u32,
}

/// How a game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub days: u32,
    /// Set when exactly one tribute survived
    pub winner: Option<String>,
    /// Names of every survivor in roster order
    pub survivors: Vec<String>,
}

/// Living tribute entities in roster order
pub fn living(world: &World) -> Vec<Entity> {
    world
        .resource::<Roster>()
        .entities
        .iter()
        .copied()
        .filter(|e| world.get::<Tribute>(*e).map_or(false, |t| t.is_alive()))
        .collect()
}

pub fn is_over(world: &World) -> bool {
    living(world).len() <= 1
}

/// Phase of the first round of `day`. The feast replaces the day round only
/// when there is a feast pool to draw from.
pub fn day_phase(world: &World, day: u32) -> Phase {
    let feast_day = world
        .get_resource::<SimulationConfig>()
        .map_or(0, |c| c.feast_day);
    let has_feast = !world.resource::<ActionPools>().the_feast.is_empty();

    if feast_day != 0 && day == feast_day && has_feast {
        Phase::TheFeast
    } else {
        Phase::Day
    }
}

/// Advance the clock and play one day: the day (or feast) round, then night
/// if more than one tribute is still alive.
pub fn run_day(world: &mut World) -> Vec<RoundSummary> {
    let day = {
        let mut clock = world.resource_mut::<GameClock>();
        clock.day += 1;
        clock.day
    };

    let phase = day_phase(world, day);
    let mut rounds = vec![run_round(world, day, phase)];
    if !is_over(world) {
        rounds.push(run_round(world, day, Phase::Night));
    }
    rounds
}

/// Play days until the game is over, handing each finished round to
/// `on_round`.
pub fn run_game(world: &mut World, mut on_round: impl FnMut(&RoundSummary)) -> GameResult {
    let max_days = world
        .get_resource::<SimulationConfig>()
        .map_or_else(|| SimulationConfig::default().max_days, |c| c.max_days);

    while !is_over(world) && world.resource::<GameClock>().day < max_days {
        for summary in run_day(world) {
            on_round(&summary);
        }
    }

    let days = world.resource::<GameClock>().day;
    let survivors: Vec<String> = living(world)
        .into_iter()
        .filter_map(|e| world.get::<Tribute>(e).map(|t| t.name.clone()))
        .collect();
    let winner = match survivors.as_slice() {
        [only] => Some(only.clone()),
        _ => None,
    };

    match &winner {
        Some(name) => tracing::info!("{} wins after {} days", name, days),
        None if survivors.is_empty() => tracing::info!("No tribute survived {} days", days),
        None => tracing::info!("{} tributes still standing after {} days", survivors.len(), days),
    }

    GameResult {
        days,
        winner,
        survivors,
    }
}
