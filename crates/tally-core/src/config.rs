#![forbid(unsafe_code)]

//! Counter configuration loaded from TOML or JSON.
//!
//! ```toml
//! # tally.toml
//! value = 1
//! min = 0
//! max = 99
//! warning = 18
//! celebration = 21
//! ```
//!
//! Every field is optional; missing fields keep the defaults, so
//! `CounterConfig::default()` reproduces the built-in counter.
//!
//! # Validation
//!
//! `from_toml_str`, `from_toml_file`, and `from_json_str` validate before
//! returning. `parse_toml_str` and `parse_toml_file` only parse, for callers
//! that layer overrides on top and then call [`CounterConfig::validate`]
//! once.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::counter::{BoundedCounter, CounterState};
use crate::error::Result;
use crate::presentation::Thresholds;

/// Starting value, bounds, and thresholds for one counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub value: i64,
    pub min: i64,
    pub max: i64,
    pub warning: i64,
    pub celebration: i64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            value: CounterState::DEFAULT_VALUE,
            min: CounterState::DEFAULT_MIN,
            max: CounterState::DEFAULT_MAX,
            warning: Thresholds::DEFAULT_WARNING,
            celebration: Thresholds::DEFAULT_CELEBRATION,
        }
    }
}

impl CounterConfig {
    /// Parse a TOML document without validating it.
    pub fn parse_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file without validating it.
    pub fn parse_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse_toml_str(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config = Self::parse_toml_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::parse_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check bounds and starting value.
    ///
    /// Thresholds outside the bounds are allowed; they simply never match.
    pub fn validate(&self) -> Result<()> {
        self.state().map(|_| ())
    }

    /// The validated initial state.
    pub fn state(&self) -> Result<CounterState> {
        CounterState::new(self.value, self.min, self.max)
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            warning: self.warning,
            celebration: self.celebration,
        }
    }

    /// Build a counter from this configuration.
    pub fn build(&self) -> Result<BoundedCounter> {
        self.state().map(BoundedCounter::from_state)
    }
}
