#![cfg(feature = "sqlite")]

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use workout_schedule::{Settings, SettingsStore, SqliteSettingsStore};

#[test]
fn sqlite_store_round_trip_settings() {
    let file = NamedTempFile::new().unwrap();
    let store = SqliteSettingsStore::new(file.path()).unwrap();
    assert!(store.load_settings().unwrap().is_none());

    let settings = Settings {
        current_week: 5,
        start_date: NaiveDate::from_ymd_opt(2025, 2, 3),
        auto_week: true,
        api_key: None,
    };
    store.save_settings(&settings).expect("save settings");

    let reopened = SqliteSettingsStore::new(file.path()).unwrap();
    let loaded = reopened
        .load_settings()
        .expect("load settings")
        .expect("settings exist");
    assert_eq!(loaded, settings);
}

#[test]
fn sqlite_store_keeps_a_single_row() {
    let store = SqliteSettingsStore::in_memory().unwrap();
    store.save_settings(&Settings::default()).unwrap();
    let mut updated = Settings::default();
    updated.current_week = 7;
    store.save_settings(&updated).unwrap();
    assert_eq!(store.load_or_default().current_week, 7);
}
