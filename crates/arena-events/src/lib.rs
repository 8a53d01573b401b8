//! Shared event and snapshot types for the arena simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The engine produces them; loggers, renderers and tests consume them.

pub mod event;
pub mod phase;
pub mod snapshot;

pub use event::{generate_event_id, EventKind, LootTransfer, RoundEvent, RoundSummary};
pub use phase::{ParsePhaseError, Phase};
pub use snapshot::{generate_snapshot_id, GameSnapshot, Standing, TributeSnapshot};
