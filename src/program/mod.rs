//! In-memory view of one fetched workout program.
//!
//! The first row of the raw values is the header row. The "Week", "Day" and
//! "Exercise" columns are located by name once, and every data row is turned
//! into a [`ProgramRow`] right away.

use thiserror::Error;

pub mod source;

pub use source::{CsvFileSource, ProgramSource, SheetsValuesSource, SourceError, StaticSource};

pub const WEEK_COLUMN: &str = "Week";
pub const DAY_COLUMN: &str = "Day";
pub const EXERCISE_COLUMN: &str = "Exercise";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramTableError {
    #[error("program has no header row")]
    MissingHeaders,
    #[error("program header row has no '{0}' column")]
    MissingColumn(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    week: usize,
    day: usize,
    exercise: usize,
}

impl ColumnIndex {
    fn locate(headers: &[String]) -> Result<Self, ProgramTableError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(ProgramTableError::MissingColumn(name))
        };
        Ok(Self {
            week: find(WEEK_COLUMN)?,
            day: find(DAY_COLUMN)?,
            exercise: find(EXERCISE_COLUMN)?,
        })
    }
}

/// One data row. `week` and `exercise` are `None` when the row was too short
/// to reach those columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramRow {
    pub week: Option<String>,
    pub day: String,
    pub exercise: Option<String>,
}

impl ProgramRow {
    fn from_cells(cells: &[String], columns: ColumnIndex) -> Option<Self> {
        let day = cells.get(columns.day)?;
        if day.trim().is_empty() {
            return None;
        }
        Some(Self {
            week: cells.get(columns.week).cloned(),
            day: day.clone(),
            exercise: cells.get(columns.exercise).map(|e| e.trim().to_string()),
        })
    }

    /// Week and exercise are both present.
    pub fn is_complete(&self) -> bool {
        self.week.is_some() && self.exercise.is_some()
    }

    fn in_week(&self, week: &str) -> bool {
        self.week.as_deref() == Some(week)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramTable {
    rows: Vec<ProgramRow>,
}

impl ProgramTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_values(values: Vec<Vec<String>>) -> Result<Self, ProgramTableError> {
        let mut values = values.into_iter();
        let headers = values.next().ok_or(ProgramTableError::MissingHeaders)?;
        let columns = ColumnIndex::locate(&headers)?;
        let rows = values
            .filter_map(|cells| ProgramRow::from_cells(&cells, columns))
            .collect();
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ProgramRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Exercises of rows whose Day equals `label` exactly and whose Week cell
    /// is the decimal form of `week`, in row order.
    pub fn exercises_for(&self, week: u32, label: &str) -> Vec<String> {
        let week = week.to_string();
        self.rows
            .iter()
            .filter(|row| row.is_complete() && row.day == label && row.in_week(&week))
            .filter_map(|row| row.exercise.clone())
            .collect()
    }

    /// Lookup by a caller-supplied day name: case-insensitive on the trimmed
    /// Day cell, optionally restricted to one week.
    pub fn exercises_named(&self, name: &str, week: Option<u32>) -> Vec<String> {
        let name = name.trim().to_lowercase();
        let week = week.map(|w| w.to_string());
        self.rows
            .iter()
            .filter(|row| row.is_complete())
            .filter(|row| row.day.trim().to_lowercase() == name)
            .filter(|row| week.as_deref().is_none_or(|w| row.in_week(w)))
            .filter_map(|row| row.exercise.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn columns_are_located_by_name() {
        let table = ProgramTable::from_values(values(&[
            &["Exercise", "Notes", "Day", "Week"],
            &["Squat", "", "Legs", "2"],
        ]))
        .unwrap();
        assert_eq!(
            table.rows()[0],
            ProgramRow {
                week: Some("2".into()),
                day: "Legs".into(),
                exercise: Some("Squat".into()),
            }
        );
        assert_eq!(table.exercises_for(2, "Legs"), vec!["Squat".to_string()]);
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let err = ProgramTable::from_values(values(&[&["Week", "Day"], &["1", "Push"]]))
            .unwrap_err();
        assert_eq!(err, ProgramTableError::MissingColumn("Exercise"));
        assert_eq!(
            ProgramTable::from_values(Vec::new()).unwrap_err(),
            ProgramTableError::MissingHeaders
        );
    }

    #[test]
    fn short_rows_keep_their_day_but_are_skipped_for_exercises() {
        let table = ProgramTable::from_values(values(&[
            &["Week", "Day", "Exercise"],
            &["1", "Push"],
            &["1"],
            &["1", "", "Orphan"],
            &["1", "Push", " Bench "],
        ]))
        .unwrap();
        assert_eq!(table.rows().len(), 2);
        assert!(!table.rows()[0].is_complete());
        assert_eq!(table.exercises_for(1, "Push"), vec!["Bench".to_string()]);
    }

    #[test]
    fn week_matches_on_the_decimal_string() {
        let table = ProgramTable::from_values(values(&[
            &["Week", "Day", "Exercise"],
            &["01", "Push", "Padded"],
            &["1", "Push", "Plain"],
        ]))
        .unwrap();
        assert_eq!(table.exercises_for(1, "Push"), vec!["Plain".to_string()]);
    }

    #[test]
    fn named_lookup_ignores_case_and_optional_week() {
        let table = ProgramTable::from_values(values(&[
            &["Week", "Day", "Exercise"],
            &["1", "Monday", "Bench"],
            &["2", " monday ", "Dips"],
            &["1", "Tuesday", "Row"],
        ]))
        .unwrap();
        assert_eq!(
            table.exercises_named("MONDAY", None),
            vec!["Bench".to_string(), "Dips".to_string()]
        );
        assert_eq!(table.exercises_named("monday", Some(2)), vec!["Dips".to_string()]);
        assert!(table.exercises_for(1, "monday").is_empty());
    }
}
