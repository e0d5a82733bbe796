//! Configuration System
//!
//! Loads beach parameters from `beach.toml` so runs can be tuned without
//! recompiling. Every section is optional and falls back to its defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::beach::{BeachParams, DEFAULT_SEED};
use crate::capabilities::{Thresholds, Tier};
use crate::components::Coord;
use crate::driver::DayPlan;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "beach.toml";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Error writing TOML config
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A trigger coordinate that is not `row,col`
    #[error("invalid trigger coordinate {0:?}, expected row,col")]
    InvalidTrigger(String),
}

/// Complete beach configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeachConfig {
    #[serde(default)]
    pub beach: BeachSection,
    #[serde(default)]
    pub thresholds: ThresholdOverrides,
    #[serde(default)]
    pub run: RunConfig,
}

/// Grid size, seed and layer preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeachSection {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub tier: Tier,
}

impl Default for BeachSection {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            seed: DEFAULT_SEED,
            tier: Tier::Listeners,
        }
    }
}

/// Thresholds replacing the tier defaults when set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excitement: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smell: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiredness: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery: Option<u32>,
}

impl ThresholdOverrides {
    pub fn apply(&self, base: Thresholds) -> Thresholds {
        Thresholds {
            excitement: self.excitement.unwrap_or(base.excitement),
            smell: self.smell.unwrap_or(base.smell),
            tiredness: self.tiredness.unwrap_or(base.tiredness),
            recovery: self.recovery.unwrap_or(base.recovery),
        }
    }
}

/// Driver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Maximum ticks per day
    pub iterations: u64,
    /// Days to run, with a night between each
    pub days: u32,
    /// Cells triggered every morning as `[row, col]`; empty means the centre
    pub trigger: Vec<[usize; 2]>,
    /// Print a JSON snapshot after the trigger and every tick
    pub emit_snapshots: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            days: 1,
            trigger: Vec::new(),
            emit_snapshots: false,
        }
    }
}

impl BeachConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::from_file(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            warn!("could not load {}: {}; using defaults", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    /// Construction parameters with tier defaults and overrides resolved.
    pub fn params(&self) -> BeachParams {
        let tier = self.beach.tier;
        BeachParams::new(self.beach.width, self.beach.height, tier)
            .with_seed(self.beach.seed)
            .with_thresholds(self.thresholds.apply(tier.default_thresholds()))
    }

    /// Trigger cells, defaulting to the centre of the grid.
    pub fn trigger_coords(&self) -> Vec<Coord> {
        if self.run.trigger.is_empty() {
            return vec![(self.beach.height / 2, self.beach.width / 2)];
        }
        self.run.trigger.iter().map(|&[row, col]| (row, col)).collect()
    }

    pub fn day_plan(&self) -> DayPlan {
        DayPlan {
            trigger: self.trigger_coords(),
            iterations: self.run.iterations,
            days: self.run.days,
        }
    }
}

/// Parses a `row,col` pair as given on the command line.
pub fn parse_coord(input: &str) -> Result<Coord, ConfigError> {
    let invalid = || ConfigError::InvalidTrigger(input.to_string());
    let (row, col) = input.split_once(',').ok_or_else(invalid)?;
    let row = row.trim().parse().map_err(|_| invalid())?;
    let col = col.trim().parse().map_err(|_| invalid())?;
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = BeachConfig::from_toml_str("").unwrap();
        assert_eq!(config, BeachConfig::default());
        assert_eq!(config.beach.tier, Tier::Listeners);
        assert_eq!(config.run.iterations, 10);
    }

    #[test]
    fn test_partial_config() {
        let config = BeachConfig::from_toml_str(
            r#"
            [beach]
            width = 6
            tier = "smell"

            [thresholds]
            excitement = 2

            [run]
            trigger = [[0, 0], [5, 5]]
            days = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.beach.width, 6);
        assert_eq!(config.beach.height, 10);
        assert_eq!(config.run.days, 3);
        assert_eq!(config.trigger_coords(), vec![(0, 0), (5, 5)]);

        let params = config.params();
        assert_eq!(params.thresholds.excitement, 2);
        assert_eq!(params.thresholds.smell, 20);
        assert!(params.capabilities.smell);
        assert!(!params.capabilities.soreness);
    }

    #[test]
    fn test_trigger_defaults_to_centre() {
        let mut config = BeachConfig::default();
        config.beach.width = 7;
        config.beach.height = 4;
        assert_eq!(config.trigger_coords(), vec![(2, 3)]);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = BeachConfig::default();
        config.thresholds.tiredness = Some(3);
        config.run.trigger = vec![[1, 2]];

        let toml = config.to_toml().unwrap();
        assert!(toml.contains("tiredness = 3"));
        assert!(!toml.contains("excitement"));

        let parsed = BeachConfig::from_toml_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_toml() {
        let result = BeachConfig::from_toml_str("[beach]\nwidth = \"wide\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[beach]\nheight = 3\nseed = 7").unwrap();

        let config = BeachConfig::from_file(file.path()).unwrap();
        assert_eq!(config.beach.height, 3);
        assert_eq!(config.params().seed, 7);

        let missing = BeachConfig::from_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("3,4").unwrap(), (3, 4));
        assert_eq!(parse_coord(" 0 , 12 ").unwrap(), (0, 12));
        assert!(matches!(parse_coord("3"), Err(ConfigError::InvalidTrigger(_))));
        assert!(parse_coord("a,1").is_err());
        assert!(parse_coord("-1,1").is_err());
    }
}
