pub mod calendar;
pub mod config;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod motivation;
pub mod observability;
pub mod persistence;
pub mod program;
pub mod rotation;
pub mod schedule;
pub mod service;
pub mod settings;

pub use calendar::{Clock, FixedClock, SystemClock, WeekAnchor, resolve_week};
pub use config::{AppConfig, AppConfigError};
pub use motivation::{Motivation, Motivator};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteSettingsStore;
pub use persistence::{
    JsonSettingsStore, MemorySettingsStore, PersistenceError, SettingsStore,
    file::{load_settings_from_json, save_settings_to_json},
};
pub use program::{
    CsvFileSource, ProgramRow, ProgramSource, ProgramTable, ProgramTableError, SheetsValuesSource,
    SourceError, StaticSource,
};
pub use rotation::{Rotation, unique_day_labels};
pub use schedule::{ResolvedSchedule, ScheduleQuery, Target, resolve};
pub use service::{DailyPlan, ServiceError, WorkoutService};
pub use settings::{Settings, SettingsUpdate, SettingsUpdateError, SettingsView};
