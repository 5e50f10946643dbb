// SPDX-License-Identifier: MPL-2.0
use metrics_view::app::{App, Command, Flags};
use metrics_view::environment::{BuildMode, ColorScheme, Environment};
use metrics_view::i18n::{self, LocaleRegistry, SetupOptions, SUPPORTED_LOCALES};
use metrics_view::storage::{FileStorage, MemoryStorage, Persistence, Storage};
use metrics_view::store::{
    AppStores, MetricRecord, PersistedJson, ALIGN_METHOD_KEY, METRICS_DATA_KEY, THEME_KEY,
};
use metrics_view::theme::ThemeMode;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use tempfile::tempdir;

fn shared_memory(items: &[(&str, &str)]) -> (Rc<MemoryStorage>, Persistence) {
    let storage = Rc::new(MemoryStorage::with_items(items.iter().copied()));
    let persistence = Persistence::from_rc(storage.clone() as Rc<dyn Storage>);
    (storage, persistence)
}

fn records(value: serde_json::Value) -> Vec<MetricRecord> {
    serde_json::from_value(value).expect("array of objects")
}

#[test]
fn stored_dark_theme_switches_to_light() {
    let (storage, persistence) = shared_memory(&[(THEME_KEY, "dark")]);
    let stores = AppStores::new(&persistence, &Environment::default());
    assert_eq!(stores.theme.get(), ThemeMode::Dark);

    let observed = Rc::new(RefCell::new(Vec::new()));
    let observed_clone = Rc::clone(&observed);
    let _sub = stores
        .theme
        .subscribe(move |mode| observed_clone.borrow_mut().push(*mode));

    stores.theme.set(ThemeMode::Light);

    assert_eq!(
        *observed.borrow(),
        vec![ThemeMode::Dark, ThemeMode::Light]
    );
    assert_eq!(storage.get_item(THEME_KEY), Ok(Some("light".to_string())));
}

#[test]
fn metrics_round_trip_through_reload() {
    let (storage, persistence) = shared_memory(&[]);
    let data = records(json!([
        {"model": "base", "wer": 0.21, "tags": ["a", "b"]},
        {"model": "large", "wer": 0.09, "nested": {"ok": true}}
    ]));

    let stores = AppStores::new(&persistence, &Environment::default());
    stores.metrics_data.set(data.clone());
    drop(stores);

    let reloaded = AppStores::new(
        &Persistence::from_rc(storage as Rc<dyn Storage>),
        &Environment::default(),
    );
    assert_eq!(reloaded.metrics_data.get(), data);
    assert!(reloaded.metrics_data_shift.get().is_empty());
}

#[test]
fn malformed_metrics_slot_yields_empty_dataset() {
    let (_, persistence) = shared_memory(&[(METRICS_DATA_KEY, "definitely not json")]);
    let stores = AppStores::new(&persistence, &Environment::default());
    assert!(stores.metrics_data.get().is_empty());
}

#[test]
fn metrics_slot_holding_an_object_yields_empty_dataset() {
    let (_, persistence) = shared_memory(&[(METRICS_DATA_KEY, r#"{"wer": 1}"#)]);
    let dataset = PersistedJson::new(METRICS_DATA_KEY, Vec::<MetricRecord>::new(), persistence);
    assert!(dataset.get().is_empty());
}

#[test]
fn defaults_without_storage_access() {
    let env = Environment {
        color_scheme: Some(ColorScheme::Dark),
        locale: None,
        build_mode: BuildMode::Production,
    };
    let stores = AppStores::new(&Persistence::unavailable(), &env);

    assert_eq!(stores.theme.get(), ThemeMode::Dark);
    assert_eq!(stores.align_method.get(), "");
    stores.align_method.set("dtw".to_string());
    assert_eq!(stores.align_method.get(), "dtw");
}

#[test]
fn quota_exceeded_keeps_session_value() {
    let storage = Rc::new(MemoryStorage::with_quota(64));
    let persistence = Persistence::from_rc(storage.clone() as Rc<dyn Storage>);
    let stores = AppStores::new(&persistence, &Environment::default());

    let big: Vec<MetricRecord> = (0..50)
        .map(|i| records(json!([{ "row": i }])).remove(0))
        .collect();
    stores.metrics_data.set(big.clone());

    assert_eq!(stores.metrics_data.get(), big);
    assert_eq!(
        storage.get_item(METRICS_DATA_KEY),
        Ok(Some("[]".to_string()))
    );
}

#[test]
fn file_storage_persists_between_sessions() {
    let temp_dir = tempdir().expect("create temp dir");
    {
        let (storage, _) = FileStorage::open_in(Some(temp_dir.path().to_path_buf()))
            .expect("data dir");
        let stores = AppStores::new(&Persistence::new(storage), &Environment::default());
        stores.align_method.set("needleman-wunsch".to_string());
    }

    let (storage, warning) =
        FileStorage::open_in(Some(temp_dir.path().to_path_buf())).expect("data dir");
    assert!(warning.is_none());
    assert_eq!(
        storage.get_item(ALIGN_METHOD_KEY),
        Ok(Some("needleman-wunsch".to_string()))
    );
}

#[tokio::test]
async fn every_registered_locale_resolves() {
    let registry = LocaleRegistry::embedded();
    for code in SUPPORTED_LOCALES {
        registry
            .load(code)
            .await
            .unwrap_or_else(|err| panic!("{} failed to load: {}", code, err));
    }
}

#[tokio::test]
async fn every_locale_translates_the_title() {
    for code in SUPPORTED_LOCALES {
        let options = SetupOptions::default().prefer(Some(code.to_string()));
        let i18n = i18n::setup(LocaleRegistry::embedded(), options)
            .await
            .expect("setup");
        assert_eq!(i18n.current_locale(), code);
        assert!(!i18n.tr("app-title").starts_with("MISSING"));
    }
}

#[tokio::test]
async fn setup_without_locale_signal_activates_english() {
    let i18n = i18n::setup(LocaleRegistry::embedded(), SetupOptions::default())
        .await
        .expect("setup");
    assert_eq!(i18n.current_locale(), "en");
    assert_eq!(i18n.tr("app-title"), "Metrics Viewer");
}

#[tokio::test]
async fn commands_drive_the_persisted_state() {
    let temp_dir = tempdir().expect("create temp dir");
    let flags = Flags {
        lang: Some("en".to_string()),
        data_dir: Some(temp_dir.path().join("data").to_string_lossy().into_owned()),
        config_dir: Some(temp_dir.path().join("config").to_string_lossy().into_owned()),
        no_storage: false,
    };
    let env = Environment {
        build_mode: BuildMode::Production,
        ..Environment::default()
    };

    let import_path = temp_dir.path().join("metrics.json");
    std::fs::write(&import_path, r#"[{"wer": 0.1}, {"wer": 0.2}]"#).expect("write metrics");

    let app = App::init(flags.clone(), env.clone()).await.expect("init");
    let mut out = Vec::new();
    Command::Theme(None).run(&app, &mut out).expect("theme");
    for command in [
        Command::parse(&["theme".to_string(), "toggle".to_string()]).expect("parse"),
        Command::Align("dtw".to_string()),
        Command::Import {
            path: import_path,
            shift: true,
        },
    ] {
        command.run(&app, &mut out).expect("run");
    }
    drop(app);

    let app = App::init(flags, env).await.expect("init");
    let mut shown = Vec::new();
    Command::Show.run(&app, &mut shown).expect("show");
    let shown = String::from_utf8(shown).expect("utf8");

    assert!(shown.contains("Theme: Dark"), "{}", shown);
    assert!(shown.contains("Alignment method: dtw"), "{}", shown);
    assert!(shown.contains("Shift metrics: Records: 2"), "{}", shown);
    assert!(shown.contains("Metrics: Records: 0"), "{}", shown);
}

#[tokio::test]
async fn show_is_translated() {
    let temp_dir = tempdir().expect("create temp dir");
    let flags = Flags {
        lang: Some("fr-FR".to_string()),
        no_storage: true,
        config_dir: Some(temp_dir.path().to_string_lossy().into_owned()),
        ..Flags::default()
    };
    let app = App::init(flags, Environment::default()).await.expect("init");

    let mut out = Vec::new();
    Command::Show.run(&app, &mut out).expect("show");
    let out = String::from_utf8(out).expect("utf8");
    assert!(out.starts_with("Visionneuse de métriques"), "{}", out);
    assert!(out.contains("Langue: fr"), "{}", out);
}
