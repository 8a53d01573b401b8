//! Round Scheduler
//!
//! Drains the living roster one matched action at a time. Each tribute takes
//! part in at most one action per round. A round ends when nobody is left
//! available, or early when the pool can no longer make progress; tributes
//! left over at that point are recorded as idle.

use bevy_ecs::prelude::*;
use rand::Rng;
use std::collections::HashSet;

use arena_events::{generate_event_id, EventKind, LootTransfer, Phase, RoundEvent, RoundSummary};

use crate::actions::{Action, ActionPools};
use crate::components::{Rankings, Roster, Tribute};
use crate::config::EngineConfig;
use crate::SimRng;

use super::effects::apply_effects;
use super::loot::resolve_lethality;
use super::matcher::requirements_met;
use super::select::{sample_tuple, weighted_random_choice};

/// Resource retaining every finished round for narrative and audit
#[derive(Resource, Debug)]
pub struct History {
    pub rounds: Vec<RoundSummary>,
    next_event_id: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            rounds: Vec::new(),
            next_event_id: 1,
        }
    }

    pub fn generate_id(&mut self) -> String {
        let id = generate_event_id(self.next_event_id);
        self.next_event_id += 1;
        id
    }

    pub fn push(&mut self, summary: RoundSummary) {
        self.rounds.push(summary);
    }

    pub fn last(&self) -> Option<&RoundSummary> {
        self.rounds.last()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

/// Play one round of `phase` on `day` using the world's pool and random source.
///
/// # Panics
///
/// Panics if the world is missing the resources inserted by
/// [`crate::setup::build_world`].
pub fn run_round(world: &mut World, day: u32, phase: Phase) -> RoundSummary {
    let pool = world.resource::<ActionPools>().pool(phase).to_vec();
    let max_failed_draws = world
        .get_resource::<EngineConfig>()
        .map(|c| c.max_failed_draws)
        .unwrap_or_else(|| EngineConfig::default().max_failed_draws);

    let summary = world.resource_scope(|world, mut rng: Mut<SimRng>| {
        play_round(world, &pool, day, phase, max_failed_draws, &mut rng.0)
    });

    world.resource_mut::<History>().push(summary.clone());
    summary
}

/// Play one round with an explicit pool and random source.
pub fn play_round<R: Rng + ?Sized>(
    world: &mut World,
    pool: &[Action],
    day: u32,
    phase: Phase,
    max_failed_draws: u32,
    rng: &mut R,
) -> RoundSummary {
    let roster = world.resource::<Roster>().entities.clone();
    let mut summary = RoundSummary::new(day, phase);
    let mut used: HashSet<Entity> = HashSet::new();
    let mut available = available_tributes(world, &roster, &used);
    let mut failed_streak = 0u32;

    tracing::debug!(
        "Day {} {} round starts with {} tributes and {} actions",
        day, phase, available.len(), pool.len()
    );

    while !available.is_empty() {
        if !pool.iter().any(|a| fits(a, available.len())) {
            tracing::warn!(
                "No {} action fits the {} remaining tributes; ending round early",
                phase,
                available.len()
            );
            summary.exhausted = true;
            break;
        }

        summary.draws += 1;
        let Some(action) = weighted_random_choice(rng, pool) else {
            break;
        };

        let matched = if !fits(action, available.len()) {
            None
        } else {
            let tuple = sample_tuple(rng, &available, action.num_affected);
            is_match(world, action, &tuple).then_some(tuple)
        };

        let Some(tuple) = matched else {
            summary.failed_draws += 1;
            failed_streak += 1;
            if failed_streak >= max_failed_draws.max(1) {
                tracing::warn!(
                    "{} consecutive failed draws on day {} {}; ending round with {} tributes unused",
                    failed_streak,
                    day,
                    phase,
                    available.len()
                );
                summary.exhausted = true;
                break;
            }
            continue;
        };

        failed_streak = 0;
        used.extend(tuple.iter().copied());
        let event = execute_action(world, action, &tuple, day, phase, rng);
        summary.events.push(event);
        available = available_tributes(world, &roster, &used);
    }

    if summary.exhausted {
        for entity in &available {
            let Some(name) = world.get::<Tribute>(*entity).map(|t| t.name.clone()) else {
                continue;
            };
            let id = world.resource_mut::<History>().generate_id();
            summary.events.push(RoundEvent::idle(id, day, phase, &name));
        }
    }

    summary.alive_after = roster.iter().filter(|e| is_alive(world, **e)).count();
    tracing::info!(
        "Day {} {}: {} events, {} deaths, {} tributes remain",
        day,
        phase,
        summary.events.len(),
        summary.deaths().len(),
        summary.alive_after
    );
    summary
}

/// An action can progress the round only if it uses at least one tribute
/// and no more than are still available.
fn fits(action: &Action, available: usize) -> bool {
    action.num_affected >= 1 && action.num_affected <= available
}

fn is_alive(world: &World, entity: Entity) -> bool {
    world.get::<Tribute>(entity).map_or(false, |t| t.is_alive())
}

/// Living tributes not yet used this round, in roster order
fn available_tributes(world: &World, roster: &[Entity], used: &HashSet<Entity>) -> Vec<Entity> {
    roster
        .iter()
        .copied()
        .filter(|e| !used.contains(e) && is_alive(world, *e))
        .collect()
}

fn is_match(world: &World, action: &Action, tuple: &[Entity]) -> bool {
    let candidates: Vec<&Tribute> = tuple.iter().filter_map(|e| world.get::<Tribute>(*e)).collect();
    candidates.len() == tuple.len() && requirements_met(action, &candidates)
}

/// Apply a matched action to its tuple, resolve deaths and loot, and write
/// the results back into the world.
fn execute_action<R: Rng + ?Sized>(
    world: &mut World,
    action: &Action,
    tuple: &[Entity],
    day: u32,
    phase: Phase,
    rng: &mut R,
) -> RoundEvent {
    let mut tributes: Vec<Tribute> = tuple
        .iter()
        .filter_map(|e| world.get::<Tribute>(*e).cloned())
        .collect();

    apply_effects(action, &mut tributes);
    let resolution = resolve_lethality(action, &mut tributes, rng);

    let names: Vec<String> = tributes.iter().map(|t| t.name.clone()).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let slot_names = |slots: &[usize]| -> Vec<String> { slots.iter().map(|&i| names[i].clone()).collect() };

    for (entity, tribute) in tuple.iter().zip(tributes) {
        if let Some(mut current) = world.get_mut::<Tribute>(*entity) {
            *current = tribute;
        }
    }

    {
        let mut rankings = world.resource_mut::<Rankings>();
        for index in resolution.deaths() {
            rankings.record(tuple[index]);
        }
    }

    for &index in &resolution.killed {
        tracing::info!("{} was killed by '{}' on day {}", names[index], action.name, day);
    }
    for &index in &resolution.mishaps {
        tracing::info!("{} died during '{}' on day {}", names[index], action.name, day);
    }
    tracing::debug!("Day {} {}: '{}' applied to {:?}", day, phase, action.name, names);

    let event_id = world.resource_mut::<History>().generate_id();
    RoundEvent {
        event_id,
        day,
        phase,
        kind: EventKind::Action,
        action: Some(action.name.clone()),
        description: action.render(&name_refs),
        participants: names.clone(),
        killers: if resolution.killed.is_empty() {
            Vec::new()
        } else {
            slot_names(&resolution.killers)
        },
        killed: slot_names(&resolution.killed),
        mishaps: slot_names(&resolution.mishaps),
        loot: resolution
            .loot
            .iter()
            .map(|(index, items)| LootTransfer {
                to: names[*index].clone(),
                items: items.iter().map(|i| i.name.clone()).collect(),
            })
            .collect(),
        discarded: resolution.discarded.iter().map(|i| i.name.clone()).collect(),
    }
}
