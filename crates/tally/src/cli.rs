use std::path::PathBuf;

use clap::Parser;
use tally_core::CounterConfig;
use tally_i18n::{BASE_LOCALE, StringCatalog, embedded_catalog, load_dir};
use tally_runtime::{Program, ProgramConfig};
use tracing::info;

use crate::app::{CounterApp, UI_HEIGHT};
use crate::error::Result;
use crate::logging;

#[derive(Debug, Parser)]
#[command(
    name = "counter-app",
    about = "A bounded counter with threshold colors, confetti at 21, and localized labels",
    version
)]
pub struct Cli {
    /// TOML file with `value`, `min`, `max`, `warning`, `celebration`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Starting value.
    #[arg(long, allow_negative_numbers = true)]
    pub value: Option<i64>,

    /// Inclusive lower bound.
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<i64>,

    /// Inclusive upper bound.
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Locale tag (en, ar, es, hi, zh; region tags like zh-CN work too).
    #[arg(long, default_value = BASE_LOCALE)]
    pub locale: String,

    /// Directory with `counter-app.<tag>.json` bundles overriding the
    /// built-in strings.
    #[arg(long, value_name = "DIR")]
    pub locales_dir: Option<PathBuf>,

    /// Append logs here; filter with TALLY_LOG (default `warn`).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Draw inline in the bottom HEIGHT rows instead of the alternate screen.
    #[arg(long, value_name = "HEIGHT", num_args = 0..=1, default_missing_value = "10")]
    pub inline: Option<u16>,

    /// Disable mouse capture.
    #[arg(long)]
    pub no_mouse: bool,
}

impl Cli {
    /// Defaults, then the config file, then individual flags. Validated
    /// once, after every layer is applied.
    pub fn counter_config(&self) -> Result<CounterConfig> {
        let mut config = match &self.config {
            Some(path) => CounterConfig::parse_toml_file(path)?,
            None => CounterConfig::default(),
        };
        if let Some(value) = self.value {
            config.value = value;
        }
        if let Some(min) = self.min {
            config.min = min;
        }
        if let Some(max) = self.max {
            config.max = max;
        }
        config.validate()?;
        Ok(config)
    }

    /// Built-in bundles, overlaid with `--locales-dir` when given.
    pub fn catalog(&self) -> Result<StringCatalog> {
        let mut catalog = embedded_catalog()?;
        if let Some(dir) = &self.locales_dir {
            let loaded = load_dir(&mut catalog, dir)?;
            info!(dir = %dir.display(), loaded, "locale overrides loaded");
        }
        Ok(catalog)
    }

    #[must_use]
    pub fn program_config(&self) -> ProgramConfig {
        let config = match self.inline {
            Some(height) => ProgramConfig::inline(height.max(UI_HEIGHT)),
            None => ProgramConfig::fullscreen(),
        };
        config.with_mouse(!self.no_mouse)
    }
}

pub fn run_from_env() -> Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_file.as_deref())?;
    let config = cli.counter_config()?;
    let catalog = cli.catalog()?;
    let app = CounterApp::new(&config, catalog, &cli.locale)?;
    let mut program = Program::with_config(app, cli.program_config());
    program.run()?;
    info!(value = program.model().value(), "counter-app exited");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use tally_core::CounterError;
    use tally_runtime::ScreenMode;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("counter-app").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        let config = cli.counter_config().unwrap();
        assert_eq!(config, CounterConfig::default());
        assert_eq!(cli.locale, "en");
        assert_eq!(cli.program_config().screen_mode, ScreenMode::AltScreen);
        assert!(cli.program_config().mouse);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(&path, "value = 5\nmax = 50\nmin = 2\n").unwrap();
        let cli = parse(&["--config", path.to_str().unwrap(), "--value", "7"]);
        let config = cli.counter_config().unwrap();
        assert_eq!(config.value, 7);
        assert_eq!(config.max, 50);
        assert_eq!(config.min, 2);
    }

    #[test]
    fn flags_can_repair_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(&path, "value = 150\n").unwrap();

        let cli = parse(&["--config", path.to_str().unwrap()]);
        let err = cli.counter_config().unwrap_err();
        assert!(matches!(
            err,
            AppError::Counter(CounterError::ValueOutOfBounds { value: 150, .. })
        ));

        let cli = parse(&["--config", path.to_str().unwrap(), "--max", "200"]);
        let config = cli.counter_config().unwrap();
        assert_eq!((config.value, config.max), (150, 200));
    }

    #[test]
    fn malformed_config_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(&path, "max = \"lots\"\n").unwrap();
        let cli = parse(&["--config", path.to_str().unwrap()]);
        assert!(matches!(
            cli.counter_config().unwrap_err(),
            AppError::Counter(CounterError::Toml(_))
        ));
    }

    #[test]
    fn negative_bounds_parse() {
        let cli = parse(&["--min", "-10", "--value", "-3"]);
        let config = cli.counter_config().unwrap();
        assert_eq!((config.min, config.value), (-10, -3));
    }

    #[test]
    fn inverted_flags_are_rejected() {
        let cli = parse(&["--min", "50", "--max", "10"]);
        let err = cli.counter_config().unwrap_err();
        assert!(matches!(
            err,
            AppError::Counter(CounterError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn inline_height_defaults_and_floors() {
        let cli = parse(&["--inline"]);
        assert_eq!(
            cli.program_config().screen_mode,
            ScreenMode::Inline { ui_height: 10 }
        );
        let cli = parse(&["--inline", "4", "--no-mouse"]);
        assert_eq!(
            cli.program_config().screen_mode,
            ScreenMode::Inline { ui_height: UI_HEIGHT }
        );
        assert!(!cli.program_config().mouse);
    }

    #[test]
    fn locales_dir_overrides_strings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("counter-app.es.json"),
            r#"{"title": "Contador personalizado"}"#,
        )
        .unwrap();
        let cli = parse(&["--locales-dir", dir.path().to_str().unwrap()]);
        let catalog = cli.catalog().unwrap();
        assert_eq!(catalog.get("es", "title"), Some("Contador personalizado"));
        // keys missing from the override fall back to English
        assert_eq!(catalog.get("es", "increase"), Some("Increase"));
    }
}
