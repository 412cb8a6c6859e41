//! Property-based invariant tests for the catalog.
//!
//! 1. Interpolation with no placeholders is identity
//! 2. Interpolation never re-expands substituted values
//! 3. Missing args leave placeholder tokens intact
//! 4. Lookup never panics on arbitrary locale tags and always reaches the fallback
//! 5. Coverage percent is in [0, 100]

use proptest::prelude::*;
use tally_i18n::{LocaleStrings, StringCatalog, embedded_catalog, interpolate};

proptest! {
    #[test]
    fn interpolation_without_braces_is_identity(text in "[a-zA-Z0-9 .,!?]*") {
        prop_assert_eq!(interpolate(&text, &[("a", "b")]), text);
    }

    #[test]
    fn interpolation_is_single_pass(value in "\\{[a-z]{1,8}\\}") {
        let out = interpolate("x {name} y", &[("name", value.as_str())]);
        prop_assert_eq!(out, format!("x {value} y"));
    }

    #[test]
    fn missing_args_preserve_tokens(name in "[a-z]{1,10}") {
        let template = format!("Value: {{{name}}}");
        prop_assert_eq!(interpolate(&template, &[]), template);
    }

    #[test]
    fn arbitrary_locale_reaches_fallback(tag in "\\PC{0,16}") {
        let catalog = embedded_catalog().unwrap();
        prop_assert!(catalog.get(&tag, "title").is_some());
        let _ = catalog.negotiate(&tag);
    }

    #[test]
    fn coverage_percent_bounded(n_keys in 0usize..=10, n_locales in 1usize..=3) {
        let mut catalog = StringCatalog::new();
        for locale_idx in 0..n_locales {
            let mut ls = LocaleStrings::new();
            for k in 0..n_keys {
                if k % (locale_idx + 1) == 0 {
                    ls.insert(format!("key_{k}"), format!("val_{k}"));
                }
            }
            catalog.add_locale(&format!("l{locale_idx}"), ls);
        }
        let report = catalog.coverage_report();
        for lc in &report.locales {
            prop_assert!((0.0..=100.0).contains(&lc.coverage_percent));
            prop_assert_eq!(lc.present + lc.missing.len(), report.total_keys);
        }
    }
}
