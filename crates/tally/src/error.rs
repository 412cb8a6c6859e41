use std::path::PathBuf;

use tally_core::CounterError;
use tally_i18n::I18nError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid counter configuration: {0}")]
    Counter(#[from] CounterError),

    #[error("localization error: {0}")]
    I18n(#[from] I18nError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("logging already initialized: {0}")]
    LoggingInit(#[from] tracing_subscriber::util::TryInitError),
}

impl AppError {
    /// Process exit code: 2 for bad input, 1 for runtime failures.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Counter(_) | Self::I18n(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_exit_with_usage_code() {
        let err: AppError = CounterError::InvertedBounds { min: 3, max: 1 }.into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.to_string(),
            "invalid counter configuration: min bound 3 is greater than max bound 1"
        );
    }

    #[test]
    fn unknown_locale_exits_with_usage_code() {
        let err: AppError = I18nError::UnknownLocale("fr".into()).into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("unknown locale: fr"));
    }

    #[test]
    fn io_errors_exit_with_one() {
        let err: AppError = std::io::Error::other("tty gone").into();
        assert_eq!(err.exit_code(), 1);
    }
}
