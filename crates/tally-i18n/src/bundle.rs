#![forbid(unsafe_code)]

//! JSON locale bundles.
//!
//! A bundle is a flat JSON object mapping keys to strings, stored as
//! `<prefix>.<tag>.json` (for example `counter-app.es.json`). The counter's
//! own bundles are compiled in; [`load_dir`] reads replacement or additional
//! bundles from disk.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::{I18nError, LocaleStrings, StringCatalog};
use crate::locale::{BASE_LOCALE, LOCALES};

/// File prefix of the counter's bundles.
pub const BUNDLE_PREFIX: &str = "counter-app";

const EMBEDDED: &[(&str, &str)] = &[
    ("en", include_str!("../locales/counter-app.en.json")),
    ("ar", include_str!("../locales/counter-app.ar.json")),
    ("es", include_str!("../locales/counter-app.es.json")),
    ("hi", include_str!("../locales/counter-app.hi.json")),
    ("zh", include_str!("../locales/counter-app.zh.json")),
];

/// Parse one bundle.
pub fn parse_bundle(locale: &str, json: &str) -> Result<LocaleStrings, I18nError> {
    let value: Value = serde_json::from_str(json).map_err(|source| I18nError::Json {
        locale: locale.to_string(),
        source,
    })?;
    let Value::Object(map) = value else {
        return Err(I18nError::InvalidBundle {
            locale: locale.to_string(),
            detail: "top level must be an object".to_string(),
        });
    };

    let mut strings = LocaleStrings::new();
    for (key, value) in map {
        match value {
            Value::String(text) => strings.insert(key, text),
            other => {
                return Err(I18nError::InvalidBundle {
                    locale: locale.to_string(),
                    detail: format!("key '{key}' maps to {other}, expected a string"),
                });
            }
        }
    }
    Ok(strings)
}

/// The catalog compiled into the binary, with `en` as fallback.
pub fn embedded_catalog() -> Result<StringCatalog, I18nError> {
    let mut catalog = StringCatalog::new();
    for (tag, json) in EMBEDDED {
        catalog.add_locale(tag, parse_bundle(tag, json)?);
    }
    catalog.set_fallback_chain(vec![BASE_LOCALE.to_string()]);
    Ok(catalog)
}

/// Load `<dir>/counter-app.<tag>.json` for every known locale into `catalog`.
///
/// Missing files are skipped; unreadable or malformed files are errors.
/// Returns the number of bundles loaded.
pub fn load_dir(catalog: &mut StringCatalog, dir: impl AsRef<Path>) -> Result<usize, I18nError> {
    let dir = dir.as_ref();
    let mut loaded = 0;
    for info in LOCALES {
        let path = dir.join(format!("{BUNDLE_PREFIX}.{}.json", info.tag));
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "locale bundle not present");
                continue;
            }
            Err(source) => return Err(I18nError::Io { path, source }),
        };
        let strings = parse_bundle(info.tag, &json)?;
        if strings.is_empty() {
            warn!(locale = info.tag, "locale bundle is empty");
        }
        catalog.add_locale(info.tag, strings);
        loaded += 1;
    }
    debug!(dir = %dir.display(), loaded, "loaded locale bundles");
    Ok(loaded)
}
