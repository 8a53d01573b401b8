//! Top-level error type for running a game end to end.

use thiserror::Error;

use crate::actions::LoadError;
use crate::config::ConfigError;
use crate::setup::RosterError;

/// Errors that can stop a game before or after it runs
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Definition error: {0}")]
    Definitions(#[from] LoadError),
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}
