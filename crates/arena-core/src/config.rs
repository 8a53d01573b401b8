//! Configuration System
//!
//! Loads tuning parameters from tuning.toml for easy adjustment without
//! recompiling. Every section and field is optional.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub engine: EngineConfig,
}

/// Game-level parameters
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the shared random source
    pub seed: u64,
    /// Stop after this many days even if several tributes survive
    pub max_days: u32,
    /// Day whose day round draws from the feast pool; 0 disables the feast
    pub feast_day: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_days: 30,
            feast_day: 4,
        }
    }
}

/// Round scheduler parameters
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Consecutive draws without progress before a round is cut short
    pub max_failed_draws: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_failed_draws: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a path, or use defaults if there is no file.
    /// A file that exists but is malformed or invalid is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("No tuning file at {}. Using defaults.", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.max_failed_draws == 0 {
            return Err(ConfigError::Invalid(
                "engine.max_failed_draws must be at least 1".to_string(),
            ));
        }
        if self.simulation.max_days == 0 {
            return Err(ConfigError::Invalid(
                "simulation.max_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.simulation.seed, 42);
        assert_eq!(config.engine.max_failed_draws, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_str(
            r#"
            [engine]
            max_failed_draws = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.max_failed_draws, 25);
        assert_eq!(config.simulation.max_days, 30);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_str(
            r#"
            [simulation]
            seed = 7
            max_days = 12
            feast_day = 3

            [engine]
            max_failed_draws = 200
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.feast_day, 3);
    }

    #[test]
    fn test_zero_retries_rejected() {
        let result = Config::from_str("[engine]\nmax_failed_draws = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = Config::from_str("[engine\nmax_failed_draws = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("no/such/tuning.toml").unwrap();
        assert_eq!(config.simulation.max_days, 30);
    }

    #[test]
    fn test_load_or_default_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.toml");
        fs::write(&path, "[engine]\nmax_failed_draws = 0\n").unwrap();

        let result = Config::load_or_default(&path);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_or_default_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.toml");
        fs::write(&path, "[simulation]\nseed = 7\n").unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.engine.max_failed_draws, 1000);
    }

    #[test]
    fn test_load_config_file() {
        // This test requires the tuning.toml file to exist
        if Path::new(DEFAULT_TUNING_PATH).exists() {
            let config = Config::load(DEFAULT_TUNING_PATH).unwrap();
            assert!(config.simulation.max_days > 0);
        }
    }
}
