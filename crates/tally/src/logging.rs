//! Log setup.
//!
//! The UI owns the terminal, so logs only go to a file. Without
//! `--log-file` no subscriber is installed and events are discarded.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{AppError, Result};

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "TALLY_LOG";
/// Filter used when `TALLY_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a file subscriber when `path` is given.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let log_file_error = |source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(log_file_error)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(log_file_error)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter())
        .try_init()?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}
