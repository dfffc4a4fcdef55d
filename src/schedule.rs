use crate::calendar::{self, WeekAnchor};
use crate::program::ProgramTable;
use crate::rotation::Rotation;
use crate::settings::Settings;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Today,
    Tomorrow,
}

impl Target {
    pub fn date_from(self, today: NaiveDate) -> NaiveDate {
        match self {
            Target::Today => today,
            Target::Tomorrow => today.checked_add_days(Days::new(1)).unwrap_or_else(|| {
                debug!(%today, "no calendar day after today, resolving today instead");
                today
            }),
        }
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(Target::Today),
            "tomorrow" => Ok(Target::Tomorrow),
            other => Err(format!("unknown target '{other}'")),
        }
    }
}

/// What applies on one date: program week, day label and the exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSchedule {
    pub date: NaiveDate,
    pub week: u32,
    pub day_label: String,
    pub exercises: Vec<String>,
}

impl ResolvedSchedule {
    pub fn to_cli_summary(&self) -> String {
        let mut out = format!("{} | week {} | {}", self.date, self.week, self.day_label);
        if self.exercises.is_empty() {
            out.push_str("\n  (no exercises)");
        }
        for exercise in &self.exercises {
            out.push_str("\n  - ");
            out.push_str(exercise);
        }
        out
    }
}

/// Stateless resolver over one table snapshot and one settings snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleQuery<'a> {
    table: &'a ProgramTable,
    settings: &'a Settings,
    anchor: WeekAnchor,
}

impl<'a> ScheduleQuery<'a> {
    pub fn new(table: &'a ProgramTable, settings: &'a Settings) -> Self {
        Self {
            table,
            settings,
            anchor: WeekAnchor::default(),
        }
    }

    pub fn with_week_anchor(mut self, anchor: WeekAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn rotation(&self) -> Option<Rotation> {
        Rotation::from_table(self.table)
    }

    pub fn resolve(&self, today: NaiveDate, target: Target) -> ResolvedSchedule {
        self.resolve_on(today, target.date_from(today))
    }

    /// Resolves `date`. The rotation offset comes from `date` itself, the week
    /// from whichever date the anchor picks.
    pub fn resolve_on(&self, today: NaiveDate, date: NaiveDate) -> ResolvedSchedule {
        let week = calendar::resolve_week(self.settings, self.anchor.pick(today, date));
        let Some(rotation) = self.rotation() else {
            debug!(%date, week, "program has no day labels");
            return ResolvedSchedule {
                date,
                week,
                day_label: calendar::weekday_label(date),
                exercises: Vec::new(),
            };
        };

        let offset = calendar::rotation_offset(self.settings.start_date, date);
        let label = rotation.label_at_offset(offset);
        let exercises = self.table.exercises_for(week, label);
        debug!(
            %date,
            week,
            offset,
            label,
            exercises = exercises.len(),
            "schedule resolved"
        );
        ResolvedSchedule {
            date,
            week,
            day_label: label.to_string(),
            exercises,
        }
    }
}

pub fn resolve(
    table: &ProgramTable,
    settings: &Settings,
    today: NaiveDate,
    target: Target,
) -> ResolvedSchedule {
    ScheduleQuery::new(table, settings).resolve(today, target)
}
