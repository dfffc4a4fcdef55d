use chrono::NaiveDate;
use std::sync::Arc;
use workout_schedule::motivation::FALLBACK_SENTENCE;
use workout_schedule::{
    FixedClock, MemorySettingsStore, ServiceError, Settings, SettingsStore, SettingsUpdate,
    SettingsUpdateError, StaticSource, Target, WeekAnchor, WorkoutService,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn program() -> StaticSource {
    StaticSource::from_rows([
        ["Week", "Day", "Exercise"],
        ["1", "Push", "Bench"],
        ["1", "Push", "OHP"],
        ["1", "Pull", "Row"],
        ["2", "Push", "Incline"],
        ["2", "Pull", "Chin-up"],
    ])
}

fn service_with(settings: Settings, today: NaiveDate) -> (WorkoutService, Arc<MemorySettingsStore>) {
    let store = Arc::new(MemorySettingsStore::with_settings(settings));
    let service = WorkoutService::new(store.clone(), Arc::new(program()))
        .with_clock(Arc::new(FixedClock(today)));
    (service, store)
}

fn started(start: NaiveDate) -> Settings {
    Settings {
        start_date: Some(start),
        ..Default::default()
    }
}

#[tokio::test]
async fn resolves_today_and_tomorrow_from_the_clock() {
    let (service, _) = service_with(started(d(2025, 7, 1)), d(2025, 7, 1));

    let today = service.resolve(Target::Today).await;
    assert_eq!(today.date, d(2025, 7, 1));
    assert_eq!(today.day_label, "Push");
    assert_eq!(today.exercises, vec!["Bench", "OHP"]);

    let tomorrow = service.resolve(Target::Tomorrow).await;
    assert_eq!(tomorrow.date, d(2025, 7, 2));
    assert_eq!(tomorrow.day_label, "Pull");
    assert_eq!(tomorrow.exercises, vec!["Row"]);
}

#[tokio::test]
async fn auto_week_follows_the_clock() {
    let settings = Settings {
        auto_week: true,
        current_week: 9,
        ..started(d(2025, 7, 1))
    };
    let (service, _) = service_with(settings, d(2025, 7, 8));

    let schedule = service.resolve(Target::Today).await;
    assert_eq!(schedule.week, 2);
    assert_eq!(schedule.day_label, "Pull");
    assert_eq!(schedule.exercises, vec!["Chin-up"]);
}

#[tokio::test]
async fn requested_date_anchor_uses_the_target_week() {
    let settings = Settings {
        auto_week: true,
        ..started(d(2025, 7, 1))
    };
    let (service, _) = service_with(settings, d(2025, 7, 7));
    let service = service.with_week_anchor(WeekAnchor::RequestedDate);

    let schedule = service.resolve(Target::Tomorrow).await;
    assert_eq!(schedule.date, d(2025, 7, 8));
    assert_eq!(schedule.week, 2);
}

#[tokio::test]
async fn resolve_on_handles_dates_before_the_start() {
    let (service, _) = service_with(started(d(2025, 7, 1)), d(2025, 7, 1));

    let schedule = service.resolve_on(d(2025, 6, 1)).await;
    assert_eq!(schedule.date, d(2025, 6, 1));
    assert_eq!(schedule.day_label, "Push");
}

#[test]
fn update_settings_persists_the_whole_record() {
    let (service, store) = service_with(Settings::default(), d(2025, 7, 1));

    let update = SettingsUpdate {
        current_week: Some(3),
        start_date: Some("2025-07-01".into()),
        auto_week: Some(true),
        api_key: Some("sk-abc".into()),
    };
    let saved = service.update_settings(&update).unwrap();

    assert_eq!(saved.current_week, 3);
    assert_eq!(saved.start_date, Some(d(2025, 7, 1)));
    assert!(saved.auto_week);
    assert_eq!(saved.api_key(), Some("sk-abc"));
    assert_eq!(store.load_settings().unwrap(), Some(saved.clone()));
    assert_eq!(service.settings(), saved);
}

#[test]
fn invalid_update_leaves_the_store_untouched() {
    let original = started(d(2025, 7, 1));
    let (service, store) = service_with(original.clone(), d(2025, 7, 1));

    let update = SettingsUpdate {
        current_week: Some(0),
        auto_week: Some(true),
        ..Default::default()
    };
    let err = service.update_settings(&update).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::InvalidUpdate(SettingsUpdateError::WeekOutOfRange(0))
    ));
    assert_eq!(store.load_settings().unwrap(), Some(original));
}

#[tokio::test]
async fn plan_without_a_key_uses_the_fallback_line() {
    let (service, _) = service_with(started(d(2025, 7, 1)), d(2025, 7, 1));

    let plan = service.plan(Target::Today).await;
    assert_eq!(plan.schedule.day_label, "Push");
    assert_eq!(plan.motivation.sentence, FALLBACK_SENTENCE);
    assert_eq!(plan.motivation.cost, 0.0);
}

#[tokio::test]
async fn lookups_by_name_and_rotation_labels() {
    let (service, _) = service_with(Settings::default(), d(2025, 7, 1));

    assert_eq!(
        service.exercises_named("push", None).await,
        vec!["Bench", "OHP", "Incline"]
    );
    assert_eq!(service.exercises_named("PULL", Some(2)).await, vec!["Chin-up"]);
    assert!(service.exercises_named("Legs", None).await.is_empty());
    assert_eq!(service.rotation_labels().await, vec!["Push", "Pull"]);
}
