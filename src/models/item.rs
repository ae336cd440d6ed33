use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklogItem {
    /// UUID assigned at creation, never reused.
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub developer: String,
    pub status: ItemStatus,
    /// `Some(name)` while the item sits in that sprint's backlog,
    /// `None` while it sits in the product backlog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
    /// Duration token, e.g. "1w 2d 3h 30m". Empty until set.
    #[serde(default)]
    pub estimated_time: String,
    /// Duration token for actual time spent. Empty until set.
    #[serde(default)]
    pub completion_time: String,
    /// ISO `YYYY-MM-DD`, set only while status is Completed.
    #[serde(default)]
    pub completion_date: String,
    /// Millisecond timestamp; stable tiebreaker for sorting.
    pub created_at: i64,
    /// Sprint name recorded at the moment of completion. Audit field,
    /// kept even if the item moves afterwards.
    #[serde(default)]
    pub completed_in_sprint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemStatus {
    #[default]
    #[serde(rename = "Awaiting Action")]
    AwaitingAction,
    #[serde(rename = "Under Development")]
    UnderDevelopment,
    #[serde(rename = "Completed")]
    Completed,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::AwaitingAction => "Awaiting Action",
            ItemStatus::UnderDevelopment => "Under Development",
            ItemStatus::Completed => "Completed",
        }
    }
}

/// Counts per status, shown in the product backlog header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub awaiting_action: usize,
    pub under_development: usize,
    pub completed: usize,
}

pub fn status_summary(items: &[BacklogItem]) -> StatusSummary {
    let mut summary = StatusSummary::default();
    for item in items {
        match item.status {
            ItemStatus::AwaitingAction => summary.awaiting_action += 1,
            ItemStatus::UnderDevelopment => summary.under_development += 1,
            ItemStatus::Completed => summary.completed += 1,
        }
    }
    summary
}
