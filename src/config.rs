use crate::calendar::WeekAnchor;
use crate::program::source::{DEFAULT_RANGE, DEFAULT_SHEETS_BASE_URL};
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "WORKOUT";
/// Applied to every outbound HTTP client unless overridden.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("config error: {0}")]
    Load(#[from] ConfigError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub program: ProgramConfig,
    #[serde(default)]
    pub motivation: MotivationConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Json,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_settings_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_settings_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Csv,
    Sheets,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramConfig {
    #[serde(default)]
    pub source: SourceKind,
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_sheets_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            csv_path: default_csv_path(),
            spreadsheet_id: String::new(),
            range: default_range(),
            api_key: None,
            base_url: default_sheets_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProgramConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MotivationConfig {
    #[serde(default = "default_motivation_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MotivationConfig {
    fn default() -> Self {
        Self {
            base_url: default_motivation_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MotivationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub week_anchor: WeekAnchor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("settings.json")
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("program.csv")
}

fn default_range() -> String {
    DEFAULT_RANGE.to_string()
}

fn default_sheets_base_url() -> String {
    DEFAULT_SHEETS_BASE_URL.to_string()
}

fn default_motivation_base_url() -> String {
    crate::motivation::DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    crate::motivation::DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT.as_secs()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (WORKOUT__SERVER__ADDR, etc.)
    /// 2. Config file given by path, `WORKOUT_CONFIG`, or `config/default.toml`
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self, AppConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.addr", default_addr())?
            .set_default("storage.backend", "json")?
            .set_default("storage.path", "settings.json")?
            .set_default("logging.level", default_log_level())?;

        let path = config_path
            .map(Path::to_path_buf)
            .or_else(|| env::var(format!("{ENV_PREFIX}_CONFIG")).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        // An explicit path must exist; the default one is optional.
        let required = config_path.is_some();
        if required || path.exists() {
            builder = builder.add_source(File::from(path).required(required));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppConfigError> {
        match self.program.source {
            SourceKind::Csv if self.program.csv_path.as_os_str().is_empty() => {
                return Err(AppConfigError::Invalid(
                    "program.csv_path must be set for the csv source".into(),
                ));
            }
            SourceKind::Sheets if self.program.spreadsheet_id.trim().is_empty() => {
                return Err(AppConfigError::Invalid(
                    "program.spreadsheet_id must be set for the sheets source".into(),
                ));
            }
            _ => {}
        }
        if self.program.timeout_secs == 0 || self.motivation.timeout_secs == 0 {
            return Err(AppConfigError::Invalid(
                "timeouts must be at least one second".into(),
            ));
        }
        if self.server.addr.trim().is_empty() {
            return Err(AppConfigError::Invalid("server.addr must be set".into()));
        }
        Ok(())
    }
}
