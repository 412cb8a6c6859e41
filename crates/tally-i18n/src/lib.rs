#![forbid(unsafe_code)]

//! Localization for Tally.
//!
//! Provides key-based string lookup with locale fallback chains, `{name}`
//! interpolation, and JSON bundle loading.
//!
//! # Role in Tally
//! The counter's static labels (title, button captions, hints) live here so
//! the widget and the app stay language-agnostic. This crate does not depend
//! on rendering or the counter core.

pub mod bundle;
pub mod catalog;
pub mod locale;

pub use bundle::{embedded_catalog, load_dir, parse_bundle};
pub use catalog::{
    CoverageReport, I18nError, LocaleCoverage, LocaleStrings, StringCatalog, interpolate,
    language_subtag,
};
pub use locale::{BASE_LOCALE, LOCALES, LocaleInfo, locale_info, next_locale};
