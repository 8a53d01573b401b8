//! Round phases.
//!
//! Each phase selects one of the named action pools.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The part of the day a round is played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Day,
    Night,
    TheFeast,
}

impl Phase {
    /// Name of the action pool this phase draws from.
    pub fn pool_name(&self) -> &'static str {
        match self {
            Phase::Day => "day",
            Phase::Night => "night",
            Phase::TheFeast => "the_feast",
        }
    }

    /// Returns all phase variants.
    pub fn all() -> &'static [Phase] {
        &[Phase::Day, Phase::Night, Phase::TheFeast]
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pool_name())
    }
}

/// Error returned when a pool name is not one of the known phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePhaseError(pub String);

impl fmt::Display for ParsePhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown phase: '{}', expected 'day', 'night' or 'the_feast'",
            self.0
        )
    }
}

impl std::error::Error for ParsePhaseError {}

impl FromStr for Phase {
    type Err = ParsePhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Phase::Day),
            "night" => Ok(Phase::Night),
            "the_feast" | "feast" => Ok(Phase::TheFeast),
            _ => Err(ParsePhaseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_pool_names() {
        assert_eq!(Phase::Day.pool_name(), "day");
        assert_eq!(Phase::TheFeast.to_string(), "the_feast");
        assert_eq!(
            serde_json::to_string(&Phase::TheFeast).unwrap(),
            "\"the_feast\""
        );
    }

    #[test]
    fn test_phase_from_str() {
        assert_eq!("Night".parse::<Phase>().unwrap(), Phase::Night);
        assert_eq!("feast".parse::<Phase>().unwrap(), Phase::TheFeast);
        assert!("dusk".parse::<Phase>().is_err());
    }
}
