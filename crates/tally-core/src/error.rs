#![forbid(unsafe_code)]

//! Error types for counter construction and configuration loading.
//!
//! Adjusting the counter never fails: out-of-range adjustments are silent
//! no-ops. Errors only arise when a counter is built from bad bounds or when
//! a configuration file cannot be read or parsed.

use std::fmt;

/// Standard result type for `tally-core` APIs.
pub type Result<T> = std::result::Result<T, CounterError>;

/// Errors produced while constructing a counter or loading its configuration.
#[derive(Debug)]
pub enum CounterError {
    /// `min` is greater than `max`.
    InvertedBounds { min: i64, max: i64 },
    /// The initial value lies outside `min..=max`.
    ValueOutOfBounds { value: i64, min: i64, max: i64 },
    /// I/O failure reading a configuration file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
}

impl fmt::Display for CounterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedBounds { min, max } => {
                write!(f, "min bound {min} is greater than max bound {max}")
            }
            Self::ValueOutOfBounds { value, min, max } => {
                write!(f, "initial value {value} is outside {min}..={max}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for CounterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CounterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<toml::de::Error> for CounterError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err)
    }
}

impl From<serde_json::Error> for CounterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
