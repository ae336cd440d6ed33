use super::SortOrder;
use crate::error::TrackerError;
use crate::models::config::TrackerConfig;
use crate::models::sprint::Sprint;
use crate::store::{load_collection, save_collection, SPRINTS_KEY};
use crate::tracker::Tracker;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SprintSortCriteria {
    #[default]
    Name,
    StartDate,
    EndDate,
}

pub fn list_sprints(tracker: &Tracker) -> Result<Vec<Sprint>, TrackerError> {
    Ok(load_collection(tracker.store(), SPRINTS_KEY)?)
}

/// Save a brand-new sprint record. Rejects a name that is already in
/// use; editing an existing record goes through [`update_sprint`].
pub fn create_sprint(tracker: &Tracker, sprint: Sprint) -> Result<Sprint, TrackerError> {
    validate_sprint(tracker.config(), &sprint)?;

    let _guard = tracker.write_lock();
    let mut sprints: Vec<Sprint> = load_collection(tracker.store(), SPRINTS_KEY)?;
    if sprints.iter().any(|s| s.name == sprint.name) {
        return Err(TrackerError::DuplicateName(sprint.name));
    }

    sprints.push(sprint.clone());
    save_collection(tracker.store(), SPRINTS_KEY, &sprints)?;
    log::info!("created sprint '{}'", sprint.name);
    Ok(sprint)
}

/// Replace the stored record matched by name.
pub fn update_sprint(tracker: &Tracker, sprint: Sprint) -> Result<Sprint, TrackerError> {
    validate_sprint(tracker.config(), &sprint)?;

    let _guard = tracker.write_lock();
    let mut sprints: Vec<Sprint> = load_collection(tracker.store(), SPRINTS_KEY)?;
    let slot = sprints
        .iter_mut()
        .find(|s| s.name == sprint.name)
        .ok_or_else(|| TrackerError::not_found(format!("sprint '{}'", sprint.name)))?;

    *slot = sprint.clone();
    save_collection(tracker.store(), SPRINTS_KEY, &sprints)?;
    log::info!("updated sprint '{}'", sprint.name);
    Ok(sprint)
}

/// Current record for pre-filling an edit form.
pub fn get_sprint(tracker: &Tracker, name: &str) -> Result<Sprint, TrackerError> {
    let sprints: Vec<Sprint> = load_collection(tracker.store(), SPRINTS_KEY)?;
    sprints
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| TrackerError::not_found(format!("sprint '{name}'")))
}

/// Remove the sprint record only. Backlog items keep their sprint
/// reference; downstream lookups treat dangling references defensively.
pub fn delete_sprint(tracker: &Tracker, name: &str) -> Result<(), TrackerError> {
    let _guard = tracker.write_lock();
    let mut sprints: Vec<Sprint> = load_collection(tracker.store(), SPRINTS_KEY)?;
    let before = sprints.len();
    sprints.retain(|s| s.name != name);
    if sprints.len() == before {
        return Err(TrackerError::not_found(format!("sprint '{name}'")));
    }

    save_collection(tracker.store(), SPRINTS_KEY, &sprints)?;
    log::info!("deleted sprint '{name}'");
    Ok(())
}

/// Stable sort for the sprint list view. ISO dates order correctly as
/// plain strings, and unset dates (empty strings) sort first.
pub fn sort_sprints(
    sprints: &[Sprint],
    criteria: SprintSortCriteria,
    order: SortOrder,
) -> Vec<Sprint> {
    let mut sorted = sprints.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match criteria {
            SprintSortCriteria::Name => a.name.cmp(&b.name),
            SprintSortCriteria::StartDate => a.start_date.cmp(&b.start_date),
            SprintSortCriteria::EndDate => a.end_date.cmp(&b.end_date),
        };
        order.apply(ordering)
    });
    sorted
}

fn validate_sprint(config: &TrackerConfig, sprint: &Sprint) -> Result<(), TrackerError> {
    if sprint.name.trim().is_empty() {
        return Err(TrackerError::validation("sprint name is required"));
    }
    if !config.allows_sprint_name(&sprint.name) {
        return Err(TrackerError::validation(format!(
            "invalid sprint name '{}', pick one of the configured slots",
            sprint.name
        )));
    }

    for date in [&sprint.start_date, &sprint.end_date] {
        if !date.is_empty()
            && chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err()
        {
            return Err(TrackerError::validation(format!(
                "invalid date '{date}', expected YYYY-MM-DD"
            )));
        }
    }

    if let Some((start, end)) = sprint.date_range() {
        if start > end {
            return Err(TrackerError::DateRange);
        }
    }

    Ok(())
}
