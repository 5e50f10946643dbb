// SPDX-License-Identifier: MPL-2.0
//! Application bootstrap.
//!
//! [`App::init`] runs once at startup: it loads the configuration, opens
//! storage, builds the persisted stores and awaits i18n setup. Everything
//! that needs state receives it from the resulting [`App`] rather than from
//! globals.

pub mod command;

pub use command::Command;

use crate::config::{self, Config};
use crate::environment::Environment;
use crate::error::Result;
use crate::i18n::{self, I18n, LocaleRegistry, SetupOptions};
use crate::storage::{FileStorage, Persistence};
use crate::store::{AppStores, Subscription};
use crate::timing::DebugTimer;
use std::path::PathBuf;

/// Startup options taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub lang: Option<String>,
    pub data_dir: Option<String>,
    pub config_dir: Option<String>,
    /// Run without storage access, as if `[storage] enabled = false`.
    pub no_storage: bool,
}

pub struct App {
    pub config: Config,
    pub env: Environment,
    pub stores: AppStores,
    pub i18n: I18n,
    pub timer: DebugTimer,
    /// Warning keys collected during startup (config or storage problems).
    pub warnings: Vec<String>,
    _subscriptions: Vec<Subscription>,
}

impl App {
    pub async fn init(flags: Flags, env: Environment) -> Result<Self> {
        let mut warnings = Vec::new();

        let (config, warning) = config::load_with_override(flags.config_dir.map(PathBuf::from));
        warnings.extend(warning);

        let timer = match config.debug.timing {
            Some(enabled) => DebugTimer::with_enabled(enabled),
            None => DebugTimer::new(env.build_mode),
        };

        timer.time_start(Some("storage"));
        let persistence = if flags.no_storage || !config.storage.enabled {
            Persistence::unavailable()
        } else {
            match FileStorage::open_in(flags.data_dir.map(PathBuf::from)) {
                Some((storage, warning)) => {
                    warnings.extend(warning);
                    Persistence::new(storage)
                }
                None => {
                    log::warn!("No data directory available, state will not be saved");
                    Persistence::unavailable()
                }
            }
        };
        let stores = AppStores::new(&persistence, &env);
        timer.time_end(Some("storage"));

        let theme_log = stores
            .theme
            .subscribe(|mode| log::info!("Theme is {}", mode));

        timer.time_start(Some("i18n"));
        let options = SetupOptions::default()
            .prefer(flags.lang)
            .prefer(config.general.language.clone())
            .prefer(env.locale.clone());
        let i18n = i18n::setup(LocaleRegistry::embedded(), options).await?;
        timer.time_end(Some("i18n"));

        Ok(Self {
            config,
            env,
            stores,
            i18n,
            timer,
            warnings,
            _subscriptions: vec![theme_log],
        })
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("env", &self.env)
            .field("stores", &self.stores)
            .field("i18n", &self.i18n)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}
