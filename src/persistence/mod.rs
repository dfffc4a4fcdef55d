use crate::settings::Settings;
use parking_lot::RwLock;
use serde_json::Error as SerdeJsonError;
use std::io;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] SerdeJsonError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Backing store for [`Settings`].
///
/// `load_settings` returns `Ok(None)` when nothing has been stored yet.
/// Request paths that only read should go through [`SettingsStore::load_or_default`].
pub trait SettingsStore: Send + Sync {
    fn save_settings(&self, settings: &Settings) -> PersistenceResult<()>;
    fn load_settings(&self) -> PersistenceResult<Option<Settings>>;

    fn load_or_default(&self) -> Settings {
        match self.load_settings() {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(err) => {
                warn!(error = %err, "settings unreadable, falling back to defaults");
                Settings::default()
            }
        }
    }
}

/// Process-local store, mostly useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: RwLock<Option<Settings>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(Some(settings)),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn save_settings(&self, settings: &Settings) -> PersistenceResult<()> {
        *self.settings.write() = Some(settings.clone());
        Ok(())
    }

    fn load_settings(&self) -> PersistenceResult<Option<Settings>> {
        Ok(self.settings.read().clone())
    }
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::JsonSettingsStore;
