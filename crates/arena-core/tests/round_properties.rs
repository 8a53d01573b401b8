//! Round invariants checked over many seeds with the shipped data

use arena_core::output::{fallen, living_roster};
use arena_core::systems::{run_round, GameClock};
use arena_core::{build_world, load_definitions, load_roster, Config, Definitions, Tribute};
use arena_events::{EventKind, Phase};
use bevy_ecs::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;

fn data_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(file)
}

fn definitions() -> Definitions {
    load_definitions(data_path("actions.json")).unwrap()
}

fn new_world(seed: u64) -> World {
    let definitions = definitions();
    let tributes: Vec<Tribute> = load_roster(data_path("tributes.json"), &definitions.items).unwrap();
    let mut config = Config::default();
    config.simulation.seed = seed;
    build_world(definitions, tributes, &config)
}

fn total_items(world: &World) -> usize {
    living_roster(world)
        .iter()
        .chain(fallen(world).iter())
        .map(|t| t.inventory.len())
        .sum()
}

#[test]
fn test_each_living_tribute_acts_at_most_once_per_round() {
    for seed in 0..20 {
        let mut world = new_world(seed);
        for day in 1..=6 {
            world.resource_mut::<GameClock>().day = day;
            for phase in [Phase::Day, Phase::Night] {
                let alive_before: HashSet<String> =
                    living_roster(&world).into_iter().map(|t| t.name).collect();
                let summary = run_round(&mut world, day, phase);

                let mut seen = HashSet::new();
                for event in &summary.events {
                    for name in &event.participants {
                        assert!(alive_before.contains(name), "seed {}: {} was not alive", seed, name);
                        assert!(seen.insert(name.clone()), "seed {}: {} acted twice", seed, name);
                    }
                }

                // Every tribute alive at the start is either used or idle
                assert_eq!(seen.len(), alive_before.len(), "seed {}: tributes left unaccounted", seed);
                assert_eq!(summary.alive_after, living_roster(&world).len());
                assert!(fallen(&world).iter().all(|t| t.inventory.is_empty()), "seed {}", seed);
            }
        }
    }
}

#[test]
fn test_killers_survive_and_the_killed_die() {
    for seed in 0..20 {
        let mut world = new_world(seed);
        let summary = run_round(&mut world, 1, Phase::Day);
        let living: HashSet<String> = living_roster(&world).into_iter().map(|t| t.name).collect();

        for event in summary.events.iter().filter(|e| e.kind == EventKind::Action) {
            for name in event.deaths() {
                assert!(!living.contains(name));
            }
            for killer in &event.killers {
                assert!(living.contains(killer));
            }
            for transfer in &event.loot {
                assert!(event.killers.contains(&transfer.to));
            }
        }
    }
}

#[test]
fn test_loot_moves_items_without_inventing_them() {
    let shipped = definitions();
    let bonus_counts: Vec<(String, usize)> = [Phase::Day, Phase::Night, Phase::TheFeast]
        .iter()
        .flat_map(|phase| shipped.pools.pool(*phase).iter())
        .map(|a| (a.name.clone(), a.bonus_items.values().map(Vec::len).sum::<usize>()))
        .collect();

    for seed in 0..20 {
        let mut world = new_world(seed);
        let before = total_items(&world);
        let summary = run_round(&mut world, 1, Phase::Day);

        let granted: usize = summary
            .events
            .iter()
            .filter_map(|e| e.action.as_ref())
            .filter_map(|name| bonus_counts.iter().find(|(n, _)| n == name).map(|(_, c)| *c))
            .sum();
        let lost: usize = summary
            .events
            .iter()
            .map(|e| e.discarded.len())
            .sum();

        // Fallen tributes keep nothing, so every item is either held, granted,
        // removed by an action or discarded.
        assert!(total_items(&world) + lost <= before + granted, "seed {}", seed);
        assert!(
            fallen(&world).iter().all(|t| t.inventory.is_empty()),
            "seed {}: a fallen tribute still holds items",
            seed
        );
    }
}

#[test]
fn test_rounds_terminate_with_a_tiny_failure_cap() {
    let definitions = definitions();
    let tributes = load_roster(data_path("tributes.json"), &definitions.items).unwrap();
    let mut config = Config::default();
    config.engine.max_failed_draws = 1;
    let mut world = build_world(definitions, tributes, &config);

    let summary = run_round(&mut world, 1, Phase::Day);
    assert!(summary.failed_draws <= summary.draws);
    if summary.exhausted {
        assert!(summary.idle_count() > 0);
    }
}
