//! Engine configuration.
//!
//! Passed explicitly into [`crate::engine::LeagueService::new`]. A JSON file
//! may be named through `LEAGUE_SIM_CONFIG_PATH`; every field is optional.

use std::path::Path;
use std::{env, fs};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "LEAGUE_SIM_CONFIG_PATH";

pub const DEFAULT_PREDICTION_TRIALS: u32 = 1000;
pub const DEFAULT_PREDICTION_MIN_WEEK: u32 = 4;
pub const DEFAULT_SCORE_CAP: u8 = 5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    /// Monte Carlo trials per prediction request.
    pub prediction_trials: u32,
    /// Predictions are refused while `current_week` is below this.
    pub prediction_min_week: u32,
    /// Upper bound for a single side's simulated score.
    pub score_cap: u8,
    /// Fixed RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            prediction_trials: DEFAULT_PREDICTION_TRIALS,
            prediction_min_week: DEFAULT_PREDICTION_MIN_WEEK,
            score_cap: DEFAULT_SCORE_CAP,
            seed: None,
        }
    }
}

impl LeagueConfig {
    /// Deterministic configuration for tests and reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_json(&content)
    }

    /// Load from the file named by `LEAGUE_SIM_CONFIG_PATH`, or defaults when
    /// the variable is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::from_path(Path::new(path))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prediction_trials == 0 {
            return Err(ConfigError::Invalid("prediction_trials must be at least 1".into()));
        }
        if self.score_cap == 0 {
            return Err(ConfigError::Invalid("score_cap must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = LeagueConfig::from_json(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.prediction_trials, 1000);
        assert_eq!(config.prediction_min_week, 4);
        assert_eq!(config.score_cap, 5);
    }

    #[test]
    fn test_zero_trials_rejected() {
        let err = LeagueConfig::from_json(r#"{"prediction_trials": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(LeagueConfig::from_json("{seed:"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("league.json");
        fs::write(&path, r#"{"prediction_trials": 250, "score_cap": 3}"#).unwrap();

        let config = LeagueConfig::from_path(&path).unwrap();
        assert_eq!(config.prediction_trials, 250);
        assert_eq!(config.score_cap, 3);

        let missing = LeagueConfig::from_path(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
