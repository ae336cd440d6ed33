use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    /// Primary key: other collections reference sprints by name.
    pub name: String,
    /// ISO `YYYY-MM-DD`, empty string until the user picks a date.
    #[serde(default)]
    pub start_date: String,
    /// ISO `YYYY-MM-DD`, empty string until the user picks a date.
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub progress: SprintProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SprintProgress {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl Sprint {
    pub fn new(name: impl Into<String>) -> Self {
        Sprint {
            name: name.into(),
            start_date: String::new(),
            end_date: String::new(),
            progress: SprintProgress::NotStarted,
        }
    }

    /// Parsed `[start, end]` window, or `None` while either date is
    /// missing or malformed. Chart and completion-date checks go through
    /// this so sprints with unset dates degrade instead of panicking.
    pub fn date_range(&self) -> Option<(chrono::NaiveDate, chrono::NaiveDate)> {
        let start = chrono::NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d").ok()?;
        let end = chrono::NaiveDate::parse_from_str(&self.end_date, "%Y-%m-%d").ok()?;
        Some((start, end))
    }
}
