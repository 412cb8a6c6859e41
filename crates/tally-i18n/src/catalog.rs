#![forbid(unsafe_code)]

//! Key-based string catalog with locale fallback and `{name}` interpolation.
//!
//! # Lookup order
//!
//! For `get("zh-CN", key)` the catalog tries, in order:
//! 1. the exact tag (`zh-CN`),
//! 2. its language subtag (`zh`),
//! 3. each locale in the fallback chain (typically `en`).
//!
//! The first locale that has the key wins. A key missing everywhere yields
//! `None`; callers that must always show something use
//! [`StringCatalog::get_or_key`].
//!
//! # Interpolation
//!
//! `{name}` tokens are replaced in a single left-to-right pass. Replacement
//! values are never re-scanned, and tokens without a matching argument are
//! left intact.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Strings for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleStrings {
    strings: HashMap<String, String>,
}

impl LocaleStrings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.strings.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleStrings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            strings: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Catalog of locales plus the fallback chain used for missing keys.
#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    locales: HashMap<String, LocaleStrings>,
    fallback_chain: Vec<String>,
}

impl StringCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a locale.
    pub fn add_locale(&mut self, tag: &str, strings: LocaleStrings) {
        self.locales.insert(tag.to_string(), strings);
    }

    /// Locales consulted, in order, when a key is missing from the
    /// requested locale.
    pub fn set_fallback_chain(&mut self, chain: Vec<String>) {
        self.fallback_chain = chain;
    }

    #[must_use]
    pub fn fallback_chain(&self) -> &[String] {
        &self.fallback_chain
    }

    #[must_use]
    pub fn has_locale(&self, tag: &str) -> bool {
        self.locales.contains_key(tag)
    }

    /// Registered locale tags, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// The registered locale that best matches `tag`, if any.
    ///
    /// `zh-CN` and `zh_CN` both resolve to `zh` when only `zh` is present.
    #[must_use]
    pub fn negotiate(&self, tag: &str) -> Option<&str> {
        if let Some((key, _)) = self.locales.get_key_value(tag) {
            return Some(key.as_str());
        }
        let language = language_subtag(tag);
        self.locales
            .get_key_value(language)
            .map(|(key, _)| key.as_str())
    }

    /// Look up `key` for `locale`, following the fallback order.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.lookup_order(locale)
            .find_map(|tag| self.locales.get(tag).and_then(|strings| strings.get(key)))
    }

    /// Like [`get`](Self::get), but returns the key itself when nothing
    /// matches so a view always has text to draw.
    #[must_use]
    pub fn get_or_key<'a>(&'a self, locale: &str, key: &'a str) -> &'a str {
        self.get(locale, key).unwrap_or_else(|| {
            tracing::debug!(locale, key, "i18n key missing in all locales");
            key
        })
    }

    /// Look up `key` and interpolate `{name}` tokens from `args`.
    #[must_use]
    pub fn format(&self, locale: &str, key: &str, args: &[(&str, &str)]) -> Option<String> {
        self.get(locale, key).map(|template| interpolate(template, args))
    }

    /// Keys present in any locale, and which of them each locale lacks.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        let all_keys: BTreeSet<&str> = self
            .locales
            .values()
            .flat_map(LocaleStrings::keys)
            .collect();
        let total_keys = all_keys.len();

        let locales = self
            .locales()
            .into_iter()
            .map(|tag| {
                let strings = &self.locales[tag];
                let missing: Vec<String> = all_keys
                    .iter()
                    .filter(|key| !strings.contains(key))
                    .map(|key| (*key).to_string())
                    .collect();
                let present = total_keys - missing.len();
                let coverage_percent = if total_keys == 0 {
                    100.0
                } else {
                    present as f32 / total_keys as f32 * 100.0
                };
                LocaleCoverage {
                    locale: tag.to_string(),
                    present,
                    missing,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            total_keys,
            locales,
        }
    }

    fn lookup_order<'a>(&'a self, locale: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let language = language_subtag(locale);
        let base = std::iter::once(locale).chain((language != locale).then_some(language));
        base.chain(self.fallback_chain.iter().map(String::as_str))
    }
}

/// Per-catalog key coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    pub total_keys: usize,
    pub locales: Vec<LocaleCoverage>,
}

/// Key coverage for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCoverage {
    pub locale: String,
    pub present: usize,
    pub missing: Vec<String>,
    pub coverage_percent: f32,
}

/// Errors from locale bundle loading.
#[derive(Debug)]
pub enum I18nError {
    /// Bundle file could not be read.
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    /// Bundle was not valid JSON.
    Json {
        locale: String,
        source: serde_json::Error,
    },
    /// Bundle was JSON but not a flat object of strings.
    InvalidBundle { locale: String, detail: String },
    /// Requested locale is not registered.
    UnknownLocale(String),
}

impl fmt::Display for I18nError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read locale bundle {}: {source}", path.display())
            }
            Self::Json { locale, source } => {
                write!(f, "locale bundle '{locale}' is not valid JSON: {source}")
            }
            Self::InvalidBundle { locale, detail } => {
                write!(f, "locale bundle '{locale}' is invalid: {detail}")
            }
            Self::UnknownLocale(tag) => write!(f, "unknown locale: {tag}"),
        }
    }
}

impl std::error::Error for I18nError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// `zh-CN` → `zh`, `pt_BR` → `pt`, `en` → `en`.
#[must_use]
pub fn language_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

/// Replace `{name}` tokens with matching `args`, in one pass.
#[must_use]
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match args.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
