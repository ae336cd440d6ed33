use crate::analysis::time::hours_or_zero;
use crate::models::item::BacklogItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Estimated vs. actual hours for one sprint, any item status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SprintTotals {
    pub estimated: f64,
    pub actual: f64,
}

pub fn sprint_totals(sprint_name: &str, items: &[BacklogItem]) -> SprintTotals {
    let mut totals = SprintTotals::default();
    for item in items {
        if item.sprint.as_deref() != Some(sprint_name) {
            continue;
        }
        totals.estimated += hours_or_zero(&item.estimated_time);
        totals.actual += hours_or_zero(&item.completion_time);
    }
    totals
}

/// Total logged hours per developer, over every item that has both a
/// developer and a non-empty completion time.
///
/// Status is deliberately not consulted: hours logged against an
/// in-progress item count too. Developers with no contributing items
/// are omitted.
pub fn developer_totals(items: &[BacklogItem]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for item in items {
        if item.developer.is_empty() || item.completion_time.is_empty() {
            continue;
        }
        *totals.entry(item.developer.clone()).or_insert(0.0) +=
            hours_or_zero(&item.completion_time);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::{ItemStatus, Priority};

    fn item(sprint: Option<&str>, developer: &str, estimated: &str, actual: &str) -> BacklogItem {
        BacklogItem {
            id: uuid::Uuid::new_v4().to_string(),
            title: "Task".to_string(),
            priority: Priority::Low,
            developer: developer.to_string(),
            status: ItemStatus::UnderDevelopment,
            sprint: sprint.map(str::to_string),
            estimated_time: estimated.to_string(),
            completion_time: actual.to_string(),
            completion_date: String::new(),
            created_at: 0,
            completed_in_sprint: None,
        }
    }

    #[test]
    fn sprint_totals_sum_both_columns_regardless_of_status() {
        let items = vec![
            item(Some("Sprint 1"), "Daksh", "1w", "4h"),
            item(Some("Sprint 1"), "Chetan", "2d", "1d"),
            item(Some("Sprint 2"), "Daksh", "1w", "1w"),
            item(None, "Daksh", "1d", "1d"),
        ];

        let totals = sprint_totals("Sprint 1", &items);
        assert_eq!(totals.estimated, 56.0);
        assert_eq!(totals.actual, 12.0);
    }

    #[test]
    fn sprint_without_items_totals_zero() {
        let totals = sprint_totals("Sprint 3", &[]);
        assert_eq!(totals, SprintTotals::default());
    }

    #[test]
    fn developer_totals_accumulate_logged_hours() {
        let items = vec![
            item(Some("Sprint 1"), "Alice", "", "1d"),
            item(Some("Sprint 2"), "Alice", "", "4h"),
            item(Some("Sprint 1"), "Bob", "", ""),
        ];

        let totals = developer_totals(&items);
        assert_eq!(totals.get("Alice"), Some(&12.0));
        // No completion time logged: omitted, not zero.
        assert!(!totals.contains_key("Bob"));
    }

    #[test]
    fn unparseable_completion_time_counts_as_zero() {
        let items = vec![item(None, "Alice", "", "soon")];
        let totals = developer_totals(&items);
        assert_eq!(totals.get("Alice"), Some(&0.0));
    }
}
