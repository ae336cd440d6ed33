use crate::analysis::accumulation::{developer_totals, sprint_totals, SprintTotals};
use crate::analysis::burndown::{compute_burndown, BurndownPoint};
use crate::error::TrackerError;
use crate::models::item::{status_summary, StatusSummary};
use crate::models::sprint::Sprint;
use crate::store::{load_collection, SPRINTS_KEY};
use crate::tracker::Tracker;
use std::collections::BTreeMap;

/// Burndown series for one sprint. An unknown sprint or one without a
/// valid date range yields an empty series, matching how the chart
/// degrades rather than erroring.
pub fn get_burndown_data(
    tracker: &Tracker,
    sprint_name: &str,
) -> Result<Vec<BurndownPoint>, TrackerError> {
    let sprints: Vec<Sprint> = load_collection(tracker.store(), SPRINTS_KEY)?;
    let Some(sprint) = sprints.iter().find(|s| s.name == sprint_name) else {
        log::warn!("burndown requested for unknown sprint '{sprint_name}'");
        return Ok(Vec::new());
    };

    let items = super::backlog::list_sprint_backlog(tracker)?;
    Ok(compute_burndown(sprint, &items))
}

/// Estimated vs. actual totals for one sprint, any status.
pub fn get_sprint_totals(
    tracker: &Tracker,
    sprint_name: &str,
) -> Result<SprintTotals, TrackerError> {
    let items = super::backlog::list_sprint_backlog(tracker)?;
    Ok(sprint_totals(sprint_name, &items))
}

/// Logged hours per developer, optionally narrowed to one sprint.
pub fn get_developer_totals(
    tracker: &Tracker,
    sprint_name: Option<&str>,
) -> Result<BTreeMap<String, f64>, TrackerError> {
    let mut items = super::backlog::list_sprint_backlog(tracker)?;
    if let Some(name) = sprint_name {
        items.retain(|item| item.sprint.as_deref() == Some(name));
    }
    Ok(developer_totals(&items))
}

/// Status counts for the product backlog header.
pub fn get_status_summary(tracker: &Tracker) -> Result<StatusSummary, TrackerError> {
    let items = super::backlog::list_product_backlog(tracker)?;
    Ok(status_summary(&items))
}
