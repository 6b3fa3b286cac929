//! Top-level mannord configuration with layered resolution.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DirichletConfig, KargerConfig};
use crate::constants::{COMPUTATION_DIRICHLET, COMPUTATION_KARGER};
use crate::errors::ConfigError;

/// Which reputation algorithm drives classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Karger,
    Dirichlet,
}

impl Algorithm {
    /// Name under which this algorithm's computation record is stored.
    pub fn computation_name(self) -> &'static str {
        match self {
            Self::Karger => COMPUTATION_KARGER,
            Self::Dirichlet => COMPUTATION_DIRICHLET,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.computation_name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            COMPUTATION_KARGER => Ok(Self::Karger),
            COMPUTATION_DIRICHLET => Ok(Self::Dirichlet),
            other => Err(ConfigError::ValidationFailed {
                field: "algorithm".to_string(),
                message: format!("unknown algorithm '{other}'"),
            }),
        }
    }
}

/// Top-level configuration aggregating both engine sections.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`MANNORD_*`)
/// 2. Config file passed to [`MannordConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MannordConfig {
    pub algorithm: Algorithm,
    pub karger: KargerConfig,
    pub dirichlet: DirichletConfig,
}

impl MannordConfig {
    /// Load configuration from `path`, then apply environment overrides.
    ///
    /// A missing file is not an error: compiled defaults are used.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })?;
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Rounds of the selected engine.
    pub fn k_max(&self) -> usize {
        match self.algorithm {
            Algorithm::Karger => self.karger.k_max,
            Algorithm::Dirichlet => self.dirichlet.k_max,
        }
    }

    /// KarmaUser vote of the selected engine.
    pub fn karma_user_vote(&self) -> f64 {
        match self.algorithm {
            Algorithm::Karger => self.karger.karma_user_vote,
            Algorithm::Dirichlet => self.dirichlet.karma_user_vote,
        }
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `MANNORD_*` overrides read through `lookup`.
    /// Pattern: `MANNORD_ALGORITHM`, `MANNORD_KARGER_K_MAX`, `MANNORD_DIRICHLET_K_MAX`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("MANNORD_ALGORITHM") {
            self.algorithm = val.parse()?;
        }
        if let Some(val) = lookup("MANNORD_KARGER_K_MAX") {
            self.karger.k_max = parse_k_max("MANNORD_KARGER_K_MAX", &val)?;
        }
        if let Some(val) = lookup("MANNORD_DIRICHLET_K_MAX") {
            self.dirichlet.k_max = parse_k_max("MANNORD_DIRICHLET_K_MAX", &val)?;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let k = &self.karger;
        if k.k_max == 0 {
            return Err(invalid("karger.k_max", "must be at least 1"));
        }
        if !(k.asymptote > 0.0) {
            return Err(invalid("karger.asymptote", "must be greater than 0"));
        }
        if !(k.gain > 0.0) {
            return Err(invalid("karger.gain", "must be greater than 0"));
        }
        if !k.default_reliability.is_finite() {
            return Err(invalid("karger.default_reliability", "must be finite"));
        }
        k.thresholds.validate("karger")?;

        let d = &self.dirichlet;
        if d.k_max == 0 {
            return Err(invalid("dirichlet.k_max", "must be at least 1"));
        }
        if !(d.percentile > 0.0 && d.percentile < 1.0) {
            return Err(invalid("dirichlet.percentile", "must be strictly between 0 and 1"));
        }
        if !(d.grid_step > 0.0 && d.grid_step < 0.5) {
            return Err(invalid("dirichlet.grid_step", "must be in (0, 0.5)"));
        }
        if !(d.evidence_bound > 0.0) {
            return Err(invalid("dirichlet.evidence_bound", "must be greater than 0"));
        }
        d.thresholds.validate("dirichlet")?;
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn parse_k_max(var: &str, val: &str) -> Result<usize, ConfigError> {
    val.trim().parse::<usize>().map_err(|e| ConfigError::ValidationFailed {
        field: var.to_string(),
        message: e.to_string(),
    })
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
