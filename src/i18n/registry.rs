// SPDX-License-Identifier: MPL-2.0
//! Locale code → deferred bundle loader.
//!
//! Registering a locale stores a loader and nothing else; the bundle source
//! is only fetched when [`LocaleRegistry::load`] is awaited for that code.

use super::SUPPORTED_LOCALES;
use crate::error::{LocaleError, Result};
use fluent_bundle::FluentResource;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use rust_embed::RustEmbed;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// A pending bundle source (Fluent text).
pub type BundleSource = BoxFuture<'static, Result<String>>;

type Loader = Arc<dyn Fn() -> BundleSource + Send + Sync>;

#[derive(Clone, Default)]
pub struct LocaleRegistry {
    loaders: BTreeMap<String, Loader>,
}

impl LocaleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All supported locales, loaded from the bundles compiled into the binary.
    pub fn embedded() -> Self {
        let mut registry = Self::new();
        registry.register_all(SUPPORTED_LOCALES.iter().copied(), embedded_source);
        registry
    }

    /// Registers `loader` for `code`, replacing any previous registration.
    pub fn register<F, Fut>(&mut self, code: &str, loader: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        let loader: Loader = Arc::new(move || loader().boxed());
        self.loaders.insert(code.to_string(), loader);
    }

    /// Registers one loader per code. `loader` receives the code it serves.
    pub fn register_all<'a, F, Fut>(&mut self, codes: impl IntoIterator<Item = &'a str>, loader: F)
    where
        F: Fn(String) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        for code in codes {
            let loader = loader.clone();
            let owned = code.to_string();
            self.register(code, move || loader(owned.clone()));
        }
    }

    pub fn is_registered(&self, code: &str) -> bool {
        self.loaders.contains_key(code)
    }

    /// Registered codes in sorted order.
    pub fn codes(&self) -> Vec<&str> {
        self.loaders.keys().map(String::as_str).collect()
    }

    /// Runs the loader for `code` and parses the result.
    pub async fn load(&self, code: &str) -> Result<FluentResource> {
        let loader = self
            .loaders
            .get(code)
            .cloned()
            .ok_or_else(|| LocaleError::NotRegistered(code.to_string()))?;

        let source = loader().await?;
        FluentResource::try_new(source).map_err(|(_, errors)| {
            LocaleError::InvalidBundle {
                code: code.to_string(),
                reason: format!("{:?}", errors),
            }
            .into()
        })
    }
}

impl std::fmt::Debug for LocaleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleRegistry")
            .field("codes", &self.codes())
            .finish()
    }
}

async fn embedded_source(code: String) -> Result<String> {
    let file = Asset::get(&format!("{}.ftl", code)).ok_or_else(|| LocaleError::LoadFailed {
        code: code.clone(),
        reason: "no embedded bundle".to_string(),
    })?;
    Ok(String::from_utf8_lossy(file.data.as_ref()).into_owned())
}
