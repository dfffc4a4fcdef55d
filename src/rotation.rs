use crate::program::ProgramTable;
use std::collections::HashSet;

/// Distinct Day labels in the order they first appear in the table.
pub fn unique_day_labels(table: &ProgramTable) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut labels = Vec::new();
    for row in table.rows() {
        if !row.day.trim().is_empty() && seen.insert(row.day.as_str()) {
            labels.push(row.day.clone());
        }
    }
    labels
}

/// A non-empty rotation of day labels. The program repeats once every label
/// has been visited, independent of real weekdays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    labels: Vec<String>,
}

impl Rotation {
    /// `None` for an empty label list.
    pub fn new(labels: Vec<String>) -> Option<Self> {
        if labels.is_empty() {
            None
        } else {
            Some(Self { labels })
        }
    }

    pub fn from_table(table: &ProgramTable) -> Option<Self> {
        Self::new(unique_day_labels(table))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_at_offset(&self, offset: u64) -> &str {
        let index = (offset % self.labels.len() as u64) as usize;
        &self.labels[index]
    }
}
