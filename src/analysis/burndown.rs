use crate::analysis::time::hours_or_zero;
use crate::models::item::{BacklogItem, ItemStatus};
use crate::models::sprint::Sprint;
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// One day of the burndown series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurndownPoint {
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    /// Estimated hours still open at the end of this day.
    pub remaining: f64,
    /// Straight-line decay from the total to ~0 on the last day.
    pub ideal: f64,
}

/// Derive the day-indexed remaining-work series for one sprint.
///
/// Day 0 is the sprint start and carries the full estimated total; each
/// later day subtracts the estimated hours of items completed on that
/// date, floored at zero. Items with blank or unparseable estimates
/// contribute nothing. Returns an empty series when the sprint has no
/// usable date range.
pub fn compute_burndown(sprint: &Sprint, items: &[BacklogItem]) -> Vec<BurndownPoint> {
    let Some((start, end)) = sprint.date_range() else {
        log::warn!(
            "burndown skipped for sprint '{}': no valid date range",
            sprint.name
        );
        return Vec::new();
    };

    let sprint_items: Vec<&BacklogItem> = items
        .iter()
        .filter(|item| item.sprint.as_deref() == Some(sprint.name.as_str()))
        .collect();

    let total: f64 = sprint_items
        .iter()
        .map(|item| hours_or_zero(&item.estimated_time))
        .sum();

    // Inclusive of both endpoints.
    let day_count = (end - start).num_days() + 1;
    if day_count <= 0 {
        return Vec::new();
    }
    let ideal_per_day = total / day_count as f64;

    let mut series = Vec::with_capacity(day_count as usize);
    let mut remaining = total;

    for day in 0..day_count {
        let date = (start + Duration::days(day)).format("%Y-%m-%d").to_string();

        if day > 0 {
            let completed_today: f64 = sprint_items
                .iter()
                .filter(|item| {
                    item.status == ItemStatus::Completed && item.completion_date == date
                })
                .map(|item| hours_or_zero(&item.estimated_time))
                .sum();
            remaining = (remaining - completed_today).max(0.0);
        }

        series.push(BurndownPoint {
            date,
            remaining: round2(remaining),
            ideal: round2(total - ideal_per_day * day as f64),
        });
    }

    series
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
