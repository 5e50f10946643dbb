// SPDX-License-Identifier: MPL-2.0
//! Reactive application state.
//!
//! [`Observable`] is the in-memory building block; [`PersistedValue`] adds a
//! storage slot mirror on top of it. [`AppStores`] bundles the persisted
//! values the application needs and is created exactly once at startup.

pub mod codec;
pub mod observable;
pub mod persisted;

pub use codec::{Json, PlainText, SlotCodec};
pub use observable::{Observable, Subscription};
pub use persisted::{PersistedJson, PersistedText, PersistedValue};

use crate::environment::Environment;
use crate::storage::Persistence;
use crate::theme::ThemeMode;

/// Slot key for the theme preference.
pub const THEME_KEY: &str = "theme";
/// Slot key for the primary metrics dataset.
pub const METRICS_DATA_KEY: &str = "metricsData";
/// Slot key for the shift metrics dataset.
pub const METRICS_DATA_SHIFT_KEY: &str = "metricsDataShift";
/// Slot key for the alignment method selector.
pub const ALIGN_METHOD_KEY: &str = "alignMethod";

/// One row of a metrics dataset. Its fields are not interpreted here.
pub type MetricRecord = serde_json::Map<String, serde_json::Value>;

/// The persisted state shared across the application.
///
/// Clones are handles to the same stores.
#[derive(Debug, Clone)]
pub struct AppStores {
    pub theme: PersistedText<ThemeMode>,
    pub metrics_data: PersistedJson<Vec<MetricRecord>>,
    pub metrics_data_shift: PersistedJson<Vec<MetricRecord>>,
    pub align_method: PersistedText<String>,
}

impl AppStores {
    pub fn new(persistence: &Persistence, env: &Environment) -> Self {
        Self {
            theme: PersistedText::new(
                THEME_KEY,
                ThemeMode::from_color_scheme(env.color_scheme),
                persistence.clone(),
            ),
            metrics_data: PersistedJson::new(METRICS_DATA_KEY, Vec::new(), persistence.clone()),
            metrics_data_shift: PersistedJson::new(
                METRICS_DATA_SHIFT_KEY,
                Vec::new(),
                persistence.clone(),
            ),
            align_method: PersistedText::new(ALIGN_METHOD_KEY, String::new(), persistence.clone()),
        }
    }

    /// The primary or shift dataset.
    pub fn dataset(&self, shift: bool) -> &PersistedJson<Vec<MetricRecord>> {
        if shift {
            &self.metrics_data_shift
        } else {
            &self.metrics_data
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::ColorScheme;
    use crate::storage::{MemoryStorage, Storage};
    use serde_json::json;
    use std::rc::Rc;

    fn record(value: serde_json::Value) -> MetricRecord {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn empty_storage_yields_defaults() {
        let env = Environment {
            color_scheme: Some(ColorScheme::Dark),
            ..Environment::default()
        };
        let stores = AppStores::new(&Persistence::new(MemoryStorage::new()), &env);

        assert_eq!(stores.theme.get(), ThemeMode::Dark);
        assert!(stores.metrics_data.get().is_empty());
        assert!(stores.metrics_data_shift.get().is_empty());
        assert_eq!(stores.align_method.get(), "");
    }

    #[test]
    fn no_color_scheme_defaults_to_light() {
        let stores = AppStores::new(&Persistence::unavailable(), &Environment::default());
        assert_eq!(stores.theme.get(), ThemeMode::Light);
    }

    #[test]
    fn stored_theme_beats_color_scheme() {
        let env = Environment {
            color_scheme: Some(ColorScheme::Dark),
            ..Environment::default()
        };
        let storage = MemoryStorage::with_items([(THEME_KEY, "light")]);
        let stores = AppStores::new(&Persistence::new(storage), &env);
        assert_eq!(stores.theme.get(), ThemeMode::Light);
    }

    #[test]
    fn unknown_stored_theme_uses_default() {
        let storage = Rc::new(MemoryStorage::with_items([(THEME_KEY, "sepia")]));
        let persistence = Persistence::from_rc(storage.clone() as Rc<dyn Storage>);
        let stores = AppStores::new(&persistence, &Environment::default());

        assert_eq!(stores.theme.get(), ThemeMode::Light);
        assert_eq!(storage.get_item(THEME_KEY), Ok(Some("light".to_string())));
    }

    #[test]
    fn datasets_are_independent_slots() {
        let storage = Rc::new(MemoryStorage::new());
        let persistence = Persistence::from_rc(storage.clone() as Rc<dyn Storage>);
        let stores = AppStores::new(&persistence, &Environment::default());

        stores
            .dataset(false)
            .set(vec![record(json!({"wer": 0.12}))]);
        stores
            .dataset(true)
            .set(vec![record(json!({"wer": 0.3})), record(json!({"wer": 0.4}))]);

        assert_eq!(stores.metrics_data.get().len(), 1);
        assert_eq!(stores.metrics_data_shift.get().len(), 2);
        assert_eq!(
            storage.get_item(METRICS_DATA_KEY),
            Ok(Some(r#"[{"wer":0.12}]"#.to_string()))
        );
    }
}
