// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Locales are registered with deferred loaders in a [`LocaleRegistry`];
//! [`setup`] then picks the initial locale and loads only the bundles it
//! needs. Messages are Fluent (`.ftl`) bundles.
//!
//! # Locale resolution
//!
//! Candidates are tried in priority order (CLI flag, config file, OS
//! locale). Each is normalized (`en_US.UTF-8` → `en-US`) and matched against
//! the registered codes: exact match, then primary language subtag, then a
//! small alias table for codes that are not ISO 639-1 (`ja` → `jp`,
//! `uk` → `ua`). When nothing matches, the fallback locale is used.

pub mod fluent;
pub mod registry;

pub use fluent::{FluentArgs, I18n};
pub use registry::{BundleSource, LocaleRegistry};

use crate::error::Result;

/// Every locale the application ships a bundle for.
pub const SUPPORTED_LOCALES: [&str; 13] = [
    "ar", "de", "en", "es", "fr", "it", "jp", "ko", "pl", "pt", "ru", "ua", "zh",
];

/// Locale used when no preference matches and for missing messages.
pub const FALLBACK_LOCALE: &str = "en";

/// Standard language subtags whose bundle is registered under another code.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[("ja", "jp"), ("uk", "ua")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOptions {
    pub fallback_locale: String,
    /// Requested locales, highest priority first.
    pub preferred: Vec<String>,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            fallback_locale: FALLBACK_LOCALE.to_string(),
            preferred: Vec::new(),
        }
    }
}

impl SetupOptions {
    /// Appends a candidate if present.
    #[must_use]
    pub fn prefer(mut self, locale: Option<String>) -> Self {
        if let Some(locale) = locale {
            self.preferred.push(locale);
        }
        self
    }
}

/// Initializes the i18n runtime.
///
/// Loads the fallback bundle and the initial locale's bundle before
/// returning, so callers can render translated text as soon as this
/// resolves. A broken initial bundle degrades to the fallback; a broken
/// fallback bundle is an error.
pub async fn setup(registry: LocaleRegistry, options: SetupOptions) -> Result<I18n> {
    let codes = registry.codes();
    let initial = options
        .preferred
        .iter()
        .find_map(|candidate| resolve_locale(candidate, &codes))
        .unwrap_or_else(|| {
            log::debug!(
                "No preferred locale matched, using fallback '{}'",
                options.fallback_locale
            );
            options.fallback_locale.clone()
        });

    let mut i18n = I18n::new(registry, options.fallback_locale.clone());
    i18n.ensure_loaded(&options.fallback_locale).await?;

    if initial != options.fallback_locale {
        if let Err(err) = i18n.set_locale(&initial).await {
            log::warn!(
                "Could not activate locale '{}', staying on '{}': {}",
                initial,
                options.fallback_locale,
                err
            );
        }
    }

    log::debug!("i18n ready with locale '{}'", i18n.current_locale());
    Ok(i18n)
}

/// Matches a requested locale tag against registered codes.
pub fn resolve_locale(requested: &str, registered: &[&str]) -> Option<String> {
    let tag = normalize_tag(requested)?;

    let find = |code: &str| {
        registered
            .iter()
            .find(|r| r.eq_ignore_ascii_case(code))
            .map(|r| (*r).to_string())
    };

    if let Some(found) = find(tag.as_str()) {
        return Some(found);
    }

    let language = tag.split('-').next().unwrap_or(&tag).to_ascii_lowercase();
    if let Some(found) = find(language.as_str()) {
        return Some(found);
    }

    LANGUAGE_ALIASES
        .iter()
        .find(|(standard, _)| *standard == language)
        .and_then(|(_, code)| find(*code))
}

/// Turns POSIX-style locale strings into BCP 47-ish tags.
///
/// Returns `None` for empty values and the `C`/`POSIX` pseudo-locales.
fn normalize_tag(raw: &str) -> Option<String> {
    let base = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .replace('_', "-");

    if base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
        return None;
    }
    Some(base)
}
