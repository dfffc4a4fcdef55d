use crate::settings::Settings;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: i64 = 7;

/// Source of "today".
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Which date feeds the week computation when resolving a date other than
/// today. `Today` keeps tomorrow's week equal to today's even across a week
/// boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekAnchor {
    #[default]
    Today,
    RequestedDate,
}

impl WeekAnchor {
    pub fn pick(self, today: NaiveDate, requested: NaiveDate) -> NaiveDate {
        match self {
            WeekAnchor::Today => today,
            WeekAnchor::RequestedDate => requested,
        }
    }
}

/// Signed whole days from `start` to `date`.
pub fn days_between(start: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(start).num_days()
}

/// Rotation offset for `date`: days since the cycle start, clamped at zero.
/// An unknown start date counts as offset zero.
pub fn rotation_offset(start: Option<NaiveDate>, date: NaiveDate) -> u64 {
    start
        .map(|start| days_between(start, date).max(0) as u64)
        .unwrap_or(0)
}

/// Program week for `today`: the pinned `current_week`, or with `auto_week`
/// one week per seven days elapsed since `start_date`, starting at 1.
pub fn resolve_week(settings: &Settings, today: NaiveDate) -> u32 {
    if !settings.auto_week {
        return settings.current_week;
    }
    let Some(start) = settings.start_date else {
        return 1;
    };
    let days_passed = days_between(start, today);
    if days_passed < 0 {
        return 1;
    }
    u32::try_from(days_passed / DAYS_PER_WEEK + 1).unwrap_or(u32::MAX)
}

/// Real weekday name of `date`, e.g. "Monday".
pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%A").to_string()
}
