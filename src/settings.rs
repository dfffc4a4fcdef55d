use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_START_DATE: (i32, u32, u32) = (2025, 6, 29);

/// Persisted user settings driving week and rotation resolution.
///
/// `start_date` is `None` when the stored value could not be parsed; the
/// resolvers treat that as "week 1, offset 0" instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_current_week")]
    pub current_week: u32,
    #[serde(
        default = "default_start_date",
        deserialize_with = "deserialize_lenient_date"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub auto_week: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            current_week: default_current_week(),
            start_date: default_start_date(),
            auto_week: false,
            api_key: None,
        }
    }
}

impl Settings {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

fn default_current_week() -> u32 {
    1
}

fn default_start_date() -> Option<NaiveDate> {
    let (year, month, day) = DEFAULT_START_DATE;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let date = raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
    if date.is_none() && raw.as_ref().is_some_and(|v| !v.is_null()) {
        warn!(value = ?raw, "stored start_date is not a YYYY-MM-DD date");
    }
    Ok(date)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsUpdateError {
    #[error("current_week must be at least 1, got {0}")]
    WeekOutOfRange(i64),
    #[error("invalid start_date '{0}' (expected YYYY-MM-DD)")]
    InvalidStartDate(String),
}

/// Partial change to [`Settings`]; fields left as `None` are kept.
///
/// Callers load the whole record, apply the update, and save the whole record
/// back. An empty `api_key` clears the stored key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub current_week: Option<i64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub auto_week: Option<bool>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.current_week.is_none()
            && self.start_date.is_none()
            && self.auto_week.is_none()
            && self.api_key.is_none()
    }

    /// Validates every field before touching `settings`, so a rejected update
    /// leaves it unchanged.
    pub fn apply(&self, settings: &mut Settings) -> Result<(), SettingsUpdateError> {
        let week = match self.current_week {
            Some(week) if week < 1 || week > i64::from(u32::MAX) => {
                return Err(SettingsUpdateError::WeekOutOfRange(week));
            }
            Some(week) => Some(week as u32),
            None => None,
        };
        let start_date = match self.start_date.as_deref() {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|_| SettingsUpdateError::InvalidStartDate(raw.to_string()))?,
            ),
            None => None,
        };

        if let Some(week) = week {
            settings.current_week = week;
        }
        if let Some(date) = start_date {
            settings.start_date = Some(date);
        }
        if let Some(auto_week) = self.auto_week {
            settings.auto_week = auto_week;
        }
        if let Some(key) = self.api_key.as_deref() {
            let key = key.trim();
            settings.api_key = if key.is_empty() {
                None
            } else {
                Some(key.to_string())
            };
        }
        Ok(())
    }
}

/// Settings as shown to clients: the API key is reduced to a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsView {
    pub current_week: u32,
    pub start_date: Option<NaiveDate>,
    pub auto_week: bool,
    pub api_key_set: bool,
}

impl From<&Settings> for SettingsView {
    fn from(settings: &Settings) -> Self {
        Self {
            current_week: settings.current_week,
            start_date: settings.start_date,
            auto_week: settings.auto_week,
            api_key_set: settings.api_key().is_some(),
        }
    }
}
