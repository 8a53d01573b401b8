//! Arena Simulation Engine
//!
//! Loads action definitions and a roster, then plays day and night rounds
//! until one tribute remains.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use arena_core::config::DEFAULT_TUNING_PATH;
use arena_core::events::EventLogger;
use arena_core::output::{generate_snapshot, write_snapshot};
use arena_core::{build_world, load_definitions, load_roster, run_game, ArenaError, Config};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "arena_sim")]
#[command(about = "A seeded battle-royale action resolution engine")]
struct Args {
    /// Action pools and item catalog (JSON)
    #[arg(long, default_value = "data/actions.json")]
    definitions: PathBuf,

    /// Starting roster (JSON)
    #[arg(long, default_value = "data/tributes.json")]
    roster: PathBuf,

    /// Tuning file (TOML); defaults are used when it is missing
    #[arg(long, default_value = DEFAULT_TUNING_PATH)]
    config: PathBuf,

    /// Random seed, overrides the tuning file
    #[arg(long)]
    seed: Option<u64>,

    /// Day cap, overrides the tuning file
    #[arg(long)]
    max_days: Option<u32>,

    /// Where to write the JSONL event log
    #[arg(long, default_value = "output/events.jsonl")]
    events_out: PathBuf,

    /// Where to write the final snapshot
    #[arg(long, default_value = "output/final_snapshot.json")]
    snapshot_out: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), ArenaError> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(max_days) = args.max_days {
        config.simulation.max_days = max_days;
    }
    config.validate()?;

    println!("Arena Simulation Engine");
    println!("=======================");
    println!("Seed: {}", config.simulation.seed);
    println!("Max days: {}", config.simulation.max_days);
    println!();

    let definitions = load_definitions(&args.definitions)?;
    let tributes = load_roster(&args.roster, &definitions.items)?;
    println!(
        "Loaded {} actions and {} tributes",
        definitions.pools.total(),
        tributes.len()
    );

    let mut world = build_world(definitions, tributes, &config);
    let mut logger = EventLogger::new(&args.events_out)?;

    let result = run_game(&mut world, |summary| {
        for event in &summary.events {
            println!("[Day {} {}] {}", event.day, event.phase, event.description);
        }
        if let Err(e) = logger.log_round(summary) {
            tracing::warn!("Could not log round: {}", e);
        }
    });
    logger.flush()?;

    let snapshot = generate_snapshot(&mut world, "game_end");
    write_snapshot(&args.snapshot_out, &snapshot)?;

    println!();
    match &result.winner {
        Some(name) => println!("Winner: {} after {} days", name, result.days),
        None => println!("No single victor after {} days", result.days),
    }
    println!("Final standings:");
    for standing in snapshot.standings() {
        println!(
            "  {:>2}. {} (District {}) - {} kills{}",
            standing.place,
            standing.name,
            standing.district,
            standing.kill_count,
            if standing.alive { "" } else { " [fallen]" }
        );
    }
    println!("Events written to {}", args.events_out.display());

    Ok(())
}
