#![forbid(unsafe_code)]

//! Locales the counter ships with.

use crate::catalog::language_subtag;

/// Locale used when a key is missing everywhere else.
pub const BASE_LOCALE: &str = "en";

/// Display metadata for a bundled locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleInfo {
    pub tag: &'static str,
    pub name: &'static str,
    pub native: &'static str,
    pub rtl: bool,
}

pub const LOCALES: &[LocaleInfo] = &[
    LocaleInfo {
        tag: "en",
        name: "English",
        native: "English",
        rtl: false,
    },
    LocaleInfo {
        tag: "ar",
        name: "Arabic",
        native: "\u{627}\u{644}\u{639}\u{631}\u{628}\u{64a}\u{629}",
        rtl: true,
    },
    LocaleInfo {
        tag: "es",
        name: "Spanish",
        native: "Espa\u{f1}ol",
        rtl: false,
    },
    LocaleInfo {
        tag: "hi",
        name: "Hindi",
        native: "\u{939}\u{93f}\u{928}\u{94d}\u{926}\u{940}",
        rtl: false,
    },
    LocaleInfo {
        tag: "zh",
        name: "Chinese",
        native: "\u{4e2d}\u{6587}",
        rtl: false,
    },
];

/// Metadata for `tag`, matching on the language subtag.
#[must_use]
pub fn locale_info(tag: &str) -> Option<&'static LocaleInfo> {
    let language = language_subtag(tag);
    LOCALES.iter().find(|info| info.tag == language)
}

/// The locale after `tag` in [`LOCALES`], wrapping around. Unknown tags
/// start over at the first locale.
#[must_use]
pub fn next_locale(tag: &str) -> &'static LocaleInfo {
    let language = language_subtag(tag);
    let idx = LOCALES
        .iter()
        .position(|info| info.tag == language)
        .map_or(0, |i| (i + 1) % LOCALES.len());
    &LOCALES[idx]
}
