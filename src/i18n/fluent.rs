// SPDX-License-Identifier: MPL-2.0
use super::registry::LocaleRegistry;
use crate::error::{LocaleError, Result};
use fluent_bundle::{FluentBundle, FluentResource};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

pub use fluent_bundle::FluentArgs;

/// The i18n runtime: loaded bundles plus the active and fallback locales.
///
/// Bundles are loaded on first use through the [`LocaleRegistry`] and kept
/// for the rest of the session.
pub struct I18n {
    registry: LocaleRegistry,
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    current_locale: String,
    fallback_locale: String,
}

impl I18n {
    /// Creates a runtime with no bundles loaded yet. See [`super::setup`].
    pub fn new(registry: LocaleRegistry, fallback_locale: String) -> Self {
        Self {
            registry,
            bundles: HashMap::new(),
            current_locale: fallback_locale.clone(),
            fallback_locale,
        }
    }

    pub fn current_locale(&self) -> &str {
        &self.current_locale
    }

    pub fn available_locales(&self) -> Vec<&str> {
        self.registry.codes()
    }

    pub fn is_loaded(&self, code: &str) -> bool {
        self.bundles.contains_key(code)
    }

    /// Loads the bundle for `code` unless it is already loaded.
    pub async fn ensure_loaded(&mut self, code: &str) -> Result<()> {
        if self.bundles.contains_key(code) {
            return Ok(());
        }

        let resource = self.registry.load(code).await?;
        let locale: LanguageIdentifier = code.parse().unwrap_or_default();
        let mut bundle = FluentBundle::new(vec![locale]);
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| LocaleError::InvalidBundle {
                code: code.to_string(),
                reason: format!("{:?}", errors),
            })?;

        self.bundles.insert(code.to_string(), bundle);
        Ok(())
    }

    /// Switches the active locale, loading its bundle first.
    ///
    /// On failure the active locale is left unchanged.
    pub async fn set_locale(&mut self, code: &str) -> Result<()> {
        self.ensure_loaded(code).await?;
        self.current_locale = code.to_string();
        Ok(())
    }

    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    pub fn tr_with_args(&self, key: &str, args: &FluentArgs) -> String {
        self.format(key, Some(args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        [&self.current_locale, &self.fallback_locale]
            .into_iter()
            .find_map(|code| format_in(self.bundles.get(code.as_str())?, key, args))
            .unwrap_or_else(|| format!("MISSING: {}", key))
    }
}

fn format_in(
    bundle: &FluentBundle<FluentResource>,
    key: &str,
    args: Option<&FluentArgs>,
) -> Option<String> {
    let pattern = bundle.get_message(key)?.value()?;
    let mut errors = vec![];
    let value = bundle.format_pattern(pattern, args, &mut errors);
    if errors.is_empty() {
        Some(value.to_string())
    } else {
        None
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("current_locale", &self.current_locale)
            .field("fallback_locale", &self.fallback_locale)
            .field("loaded", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}
