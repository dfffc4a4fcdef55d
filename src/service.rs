//! Wiring shared by the HTTP surface and the CLI: one settings store, one
//! program source, one motivator and a clock.
//!
//! Each query re-reads settings and re-fetches the program; nothing is cached
//! between calls.

use crate::calendar::{Clock, SystemClock, WeekAnchor};
use crate::config::{AppConfig, SourceKind, StorageBackend};
use crate::motivation::{Motivation, MotivationError, Motivator};
use crate::persistence::{JsonSettingsStore, PersistenceError, SettingsStore};
use crate::program::{CsvFileSource, ProgramSource, SheetsValuesSource, SourceError};
use crate::rotation::unique_day_labels;
use crate::schedule::{ResolvedSchedule, ScheduleQuery, Target};
use crate::settings::{Settings, SettingsUpdate, SettingsUpdateError};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidUpdate(#[from] SettingsUpdateError),
    #[error("failed to save settings: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("failed to build program source: {0}")]
    Source(#[from] SourceError),
    #[error("failed to build motivation client: {0}")]
    Motivation(#[from] MotivationError),
}

/// A resolved schedule together with the motivational line for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPlan {
    pub schedule: ResolvedSchedule,
    pub motivation: Motivation,
}

#[derive(Clone)]
pub struct WorkoutService {
    store: Arc<dyn SettingsStore>,
    source: Arc<dyn ProgramSource>,
    motivator: Motivator,
    clock: Arc<dyn Clock>,
    week_anchor: WeekAnchor,
}

impl WorkoutService {
    pub fn new(store: Arc<dyn SettingsStore>, source: Arc<dyn ProgramSource>) -> Self {
        Self {
            store,
            source,
            motivator: Motivator::new(),
            clock: Arc::new(SystemClock),
            week_anchor: WeekAnchor::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        let store: Arc<dyn SettingsStore> = match config.storage.backend {
            StorageBackend::Json => Arc::new(JsonSettingsStore::new(&config.storage.path)),
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite => Arc::new(crate::persistence::sqlite::SqliteSettingsStore::new(
                &config.storage.path,
            )?),
            #[cfg(not(feature = "sqlite"))]
            StorageBackend::Sqlite => {
                return Err(PersistenceError::InvalidData(
                    "sqlite storage requires the `sqlite` feature".into(),
                )
                .into());
            }
        };

        let program = &config.program;
        let source: Arc<dyn ProgramSource> = match program.source {
            SourceKind::Csv => Arc::new(CsvFileSource::new(&program.csv_path)),
            SourceKind::Sheets => Arc::new(
                SheetsValuesSource::new(&program.spreadsheet_id, &program.range)
                    .with_base_url(&program.base_url)
                    .with_api_key(program.api_key.clone())
                    .with_timeout(program.timeout())?,
            ),
        };

        let motivator = Motivator::new()
            .with_api_base(&config.motivation.base_url)
            .with_model(&config.motivation.model)
            .with_timeout(config.motivation.timeout())?;

        Ok(Self::new(store, source)
            .with_motivator(motivator)
            .with_week_anchor(config.schedule.week_anchor))
    }

    pub fn with_motivator(mut self, motivator: Motivator) -> Self {
        self.motivator = motivator;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_week_anchor(mut self, anchor: WeekAnchor) -> Self {
        self.week_anchor = anchor;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn settings(&self) -> Settings {
        self.store.load_or_default()
    }

    /// Read-modify-write of the whole settings record. Last writer wins.
    pub fn update_settings(&self, update: &SettingsUpdate) -> Result<Settings, ServiceError> {
        let mut settings = self.store.load_or_default();
        update.apply(&mut settings)?;
        self.store.save_settings(&settings)?;
        info!(
            current_week = settings.current_week,
            auto_week = settings.auto_week,
            start_date = ?settings.start_date,
            "settings saved"
        );
        Ok(settings)
    }

    pub async fn resolve(&self, target: Target) -> ResolvedSchedule {
        let today = self.today();
        self.resolve_for(today, target.date_from(today)).await
    }

    pub async fn resolve_on(&self, date: NaiveDate) -> ResolvedSchedule {
        self.resolve_for(self.today(), date).await
    }

    async fn resolve_for(&self, today: NaiveDate, date: NaiveDate) -> ResolvedSchedule {
        let settings = self.settings();
        let table = self.source.fetch_table().await;
        ScheduleQuery::new(&table, &settings)
            .with_week_anchor(self.week_anchor)
            .resolve_on(today, date)
    }

    pub async fn plan(&self, target: Target) -> DailyPlan {
        let schedule = self.resolve(target).await;
        let motivation = self.motivation().await;
        DailyPlan {
            schedule,
            motivation,
        }
    }

    pub async fn motivation(&self) -> Motivation {
        let settings = self.settings();
        self.motivator.motivate(settings.api_key()).await
    }

    pub async fn exercises_named(&self, name: &str, week: Option<u32>) -> Vec<String> {
        self.source.fetch_table().await.exercises_named(name, week)
    }

    pub async fn rotation_labels(&self) -> Vec<String> {
        unique_day_labels(&self.source.fetch_table().await)
    }
}
