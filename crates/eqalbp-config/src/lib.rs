//! Configuration system for the EqALBP evaluator.
//!
//! Load engine configuration from TOML or YAML to choose the precedence
//! semantics, the construction-phase objective and the assertion level
//! without code changes.
//!
//! # Examples
//!
//! ```
//! use eqalbp_config::{ConstructionScore, EngineConfig, InversionSemantics};
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     environment_mode = "full_assert"
//!     inversion = "relaxed"
//!     construction_score = "cycle_time_diff"
//!     excess_load_factor = 1.1
//! "#).unwrap();
//!
//! assert_eq!(config.inversion, InversionSemantics::Relaxed);
//! assert_eq!(config.construction_score, ConstructionScore::CycleTimeDiff);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use eqalbp_config::EngineConfig;
//!
//! let config = EngineConfig::load("engine.toml").unwrap_or_default();
//! # let _ = config;
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Evaluator configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct EngineConfig {
    /// Assertion level of the incremental engine.
    pub environment_mode: EnvironmentMode,

    /// Whether a dependency may share its dependent's station.
    pub inversion: InversionSemantics,

    /// Medium-level objective used until every task has a station.
    pub construction_score: ConstructionScore,

    /// Multiple of the lower-bound cycle time above which station load counts
    /// as excess. Must be finite and at least 1.0.
    pub excess_load_factor: f64,

    /// Random seed for move selection and worker forking.
    pub random_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            inversion: InversionSemantics::default(),
            construction_score: ConstructionScore::default(),
            excess_load_factor: 1.0,
            random_seed: None,
        }
    }
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.excess_load_factor.is_finite() || self.excess_load_factor < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "excess_load_factor must be a finite number >= 1.0, got {}",
                self.excess_load_factor
            )));
        }
        Ok(())
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    pub fn with_inversion(mut self, inversion: InversionSemantics) -> Self {
        self.inversion = inversion;
        self
    }

    pub fn with_construction_score(mut self, construction_score: ConstructionScore) -> Self {
        self.construction_score = construction_score;
        self
    }

    pub fn with_excess_load_factor(mut self, factor: f64) -> Self {
        self.excess_load_factor = factor;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Station load above which load counts as excess:
    /// `ceil(excess_load_factor * lower_bound)`.
    pub fn load_limit(&self, lower_bound: u64) -> u64 {
        (self.excess_load_factor * lower_bound as f64).ceil() as u64
    }
}

/// Environment mode affecting self-checks of the incremental engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode with minimal overhead.
    #[default]
    NonReproducible,

    /// Reproducible mode: random selection is seeded.
    Reproducible,

    /// Recompute from scratch and compare on every score query.
    FastAssert,

    /// Recompute from scratch and compare after every hook call.
    FullAssert,
}

impl EnvironmentMode {
    /// Returns true if the engine should compare against a full recalculation.
    pub fn is_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FastAssert | EnvironmentMode::FullAssert)
    }
}

/// When a dependency counts as correctly placed relative to its dependent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InversionSemantics {
    /// The dependency's station must be strictly before the dependent's.
    #[default]
    Strict,

    /// The dependency may share the dependent's station.
    Relaxed,
}

impl InversionSemantics {
    /// Returns true if a dependency at `dependency_station` is satisfied for a
    /// dependent at `dependent_station`.
    #[inline]
    pub fn is_ordered(&self, dependency_station: usize, dependent_station: usize) -> bool {
        match self {
            InversionSemantics::Strict => dependency_station < dependent_station,
            InversionSemantics::Relaxed => dependency_station <= dependent_station,
        }
    }
}

/// Medium-level objective while some task is still unassigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionScore {
    /// Sum over stations of the load above the limit.
    #[default]
    ExcessLoad,

    /// How far the cycle time exceeds the limit.
    CycleTimeDiff,
}
