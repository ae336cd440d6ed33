use super::SortOrder;
use crate::error::TrackerError;
use crate::models::item::{BacklogItem, ItemStatus, Priority};
use crate::models::sprint::Sprint;
use crate::store::{
    load_collection, save_collection, PRODUCT_BACKLOG_KEY, SPRINTS_KEY, SPRINT_BACKLOG_KEY,
};
use crate::tracker::Tracker;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemSortCriteria {
    #[default]
    CreatedAt,
    Title,
    Priority,
    Status,
    Developer,
}

/// Fields an edit form submits together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEdit {
    pub title: String,
    pub priority: Priority,
    pub developer: String,
    pub status: ItemStatus,
    /// Required when `status` is Completed and the item was not
    /// already completed with a date.
    #[serde(default)]
    pub completion_date: Option<String>,
}

pub fn list_product_backlog(tracker: &Tracker) -> Result<Vec<BacklogItem>, TrackerError> {
    Ok(load_collection(tracker.store(), PRODUCT_BACKLOG_KEY)?)
}

pub fn list_sprint_backlog(tracker: &Tracker) -> Result<Vec<BacklogItem>, TrackerError> {
    Ok(load_collection(tracker.store(), SPRINT_BACKLOG_KEY)?)
}

/// Items scheduled into one sprint.
pub fn list_sprint_items(
    tracker: &Tracker,
    sprint_name: &str,
) -> Result<Vec<BacklogItem>, TrackerError> {
    let items = list_sprint_backlog(tracker)?;
    Ok(items
        .into_iter()
        .filter(|item| item.sprint.as_deref() == Some(sprint_name))
        .collect())
}

/// Add a new item to the product backlog.
pub fn create_item(
    tracker: &Tracker,
    title: &str,
    priority: Priority,
    developer: &str,
) -> Result<BacklogItem, TrackerError> {
    if title.trim().is_empty() {
        return Err(TrackerError::validation("item title is required"));
    }
    if !tracker.config().knows_developer(developer) {
        return Err(TrackerError::validation(format!(
            "unknown developer '{developer}'"
        )));
    }

    let item = BacklogItem {
        id: uuid::Uuid::new_v4().to_string(),
        title: title.trim().to_string(),
        priority,
        developer: developer.to_string(),
        status: ItemStatus::AwaitingAction,
        sprint: None,
        estimated_time: String::new(),
        completion_time: String::new(),
        completion_date: String::new(),
        created_at: chrono::Utc::now().timestamp_millis(),
        completed_in_sprint: None,
    };

    let _guard = tracker.write_lock();
    let mut backlog: Vec<BacklogItem> = load_collection(tracker.store(), PRODUCT_BACKLOG_KEY)?;
    backlog.push(item.clone());
    save_collection(tracker.store(), PRODUCT_BACKLOG_KEY, &backlog)?;
    log::debug!("created backlog item '{}' ({})", item.title, item.id);
    Ok(item)
}

/// Move an item from the product backlog into a sprint backlog.
///
/// Idempotent when the item is already in that sprint; both collection
/// writes happen under one validated read-modify-write so the item is
/// never in both places.
pub fn transfer_to_sprint(
    tracker: &Tracker,
    id: &str,
    sprint_name: &str,
) -> Result<BacklogItem, TrackerError> {
    let _guard = tracker.write_lock();

    let sprints: Vec<Sprint> = load_collection(tracker.store(), SPRINTS_KEY)?;
    if !sprints.iter().any(|s| s.name == sprint_name) {
        return Err(TrackerError::not_found(format!("sprint '{sprint_name}'")));
    }

    let mut sprint_backlog: Vec<BacklogItem> =
        load_collection(tracker.store(), SPRINT_BACKLOG_KEY)?;
    if let Some(existing) = sprint_backlog.iter().find(|item| item.id == id) {
        if existing.sprint.as_deref() == Some(sprint_name) {
            // Already there; do not duplicate.
            return Ok(existing.clone());
        }
        return Err(TrackerError::validation(format!(
            "item '{id}' is already scheduled into another sprint"
        )));
    }

    let mut product_backlog: Vec<BacklogItem> =
        load_collection(tracker.store(), PRODUCT_BACKLOG_KEY)?;
    let position = product_backlog
        .iter()
        .position(|item| item.id == id)
        .ok_or_else(|| TrackerError::not_found(format!("backlog item '{id}'")))?;

    let mut item = product_backlog.remove(position);
    item.sprint = Some(sprint_name.to_string());
    item.status = ItemStatus::AwaitingAction;
    item.estimated_time.clear();
    item.completion_time.clear();
    item.completion_date.clear();
    sprint_backlog.push(item.clone());

    // Destination before source: a crash in between duplicates the item
    // instead of dropping it.
    save_collection(tracker.store(), SPRINT_BACKLOG_KEY, &sprint_backlog)?;
    save_collection(tracker.store(), PRODUCT_BACKLOG_KEY, &product_backlog)?;
    log::debug!("transferred item '{id}' into '{sprint_name}'");
    Ok(item)
}

/// Pull an item out of its sprint backlog, back into the product
/// backlog. Only legal while the item is still Awaiting Action; an item
/// in progress or completed needs an explicit status reset first.
pub fn move_to_product_backlog(tracker: &Tracker, id: &str) -> Result<BacklogItem, TrackerError> {
    let _guard = tracker.write_lock();

    let mut product_backlog: Vec<BacklogItem> =
        load_collection(tracker.store(), PRODUCT_BACKLOG_KEY)?;
    if let Some(existing) = product_backlog.iter().find(|item| item.id == id) {
        return Ok(existing.clone());
    }

    let mut sprint_backlog: Vec<BacklogItem> =
        load_collection(tracker.store(), SPRINT_BACKLOG_KEY)?;
    let position = sprint_backlog
        .iter()
        .position(|item| item.id == id)
        .ok_or_else(|| TrackerError::not_found(format!("backlog item '{id}'")))?;

    if sprint_backlog[position].status != ItemStatus::AwaitingAction {
        return Err(TrackerError::validation(
            "only items awaiting action can be moved back to the product backlog",
        ));
    }

    let mut item = sprint_backlog.remove(position);
    item.sprint = None;
    item.completion_date.clear();
    product_backlog.push(item.clone());

    save_collection(tracker.store(), PRODUCT_BACKLOG_KEY, &product_backlog)?;
    save_collection(tracker.store(), SPRINT_BACKLOG_KEY, &sprint_backlog)?;
    log::debug!("moved item '{id}' back to the product backlog");
    Ok(item)
}

/// Change an item's status wherever it currently lives.
///
/// Completion requires a date inside the owning sprint's window. Items
/// still in the product backlog may be completed against a
/// caller-supplied sprint context (legacy path); their location does not
/// change, but `completed_in_sprint` is recorded.
pub fn set_status(
    tracker: &Tracker,
    id: &str,
    new_status: ItemStatus,
    completion_date: Option<&str>,
    sprint_context: Option<&str>,
) -> Result<BacklogItem, TrackerError> {
    let _guard = tracker.write_lock();
    with_item(tracker, id, |item, sprints| {
        apply_status(item, new_status, completion_date, sprint_context, sprints)
    })
}

/// Update title/priority/developer/status together, the way the edit
/// form submits them.
pub fn edit_item(
    tracker: &Tracker,
    id: &str,
    edit: &ItemEdit,
    sprint_context: Option<&str>,
) -> Result<BacklogItem, TrackerError> {
    if edit.title.trim().is_empty() {
        return Err(TrackerError::validation("item title is required"));
    }
    if !tracker.config().knows_developer(&edit.developer) {
        return Err(TrackerError::validation(format!(
            "unknown developer '{}'",
            edit.developer
        )));
    }

    let _guard = tracker.write_lock();
    with_item(tracker, id, |item, sprints| {
        // Carry a previously recorded completion date through an edit
        // that keeps the item completed.
        let date = edit
            .completion_date
            .as_deref()
            .or_else(|| (!item.completion_date.is_empty()).then_some(item.completion_date.as_str()))
            .map(str::to_string);

        apply_status(item, edit.status, date.as_deref(), sprint_context, sprints)?;
        item.title = edit.title.trim().to_string();
        item.priority = edit.priority;
        item.developer = edit.developer.clone();
        Ok(())
    })
}

/// Record an item's estimated time. The token must parse as a duration;
/// a rejected token leaves the stored value as it was so the UI can
/// report the field error and retry.
pub fn set_estimated_time(
    tracker: &Tracker,
    id: &str,
    token: &str,
) -> Result<BacklogItem, TrackerError> {
    crate::analysis::time::parse_duration(token)?;
    let _guard = tracker.write_lock();
    with_item(tracker, id, |item, _| {
        item.estimated_time = token.trim().to_string();
        Ok(())
    })
}

/// Record the actual time spent on an item, validated like
/// [`set_estimated_time`].
pub fn set_completion_time(
    tracker: &Tracker,
    id: &str,
    token: &str,
) -> Result<BacklogItem, TrackerError> {
    crate::analysis::time::parse_duration(token)?;
    let _guard = tracker.write_lock();
    with_item(tracker, id, |item, _| {
        item.completion_time = token.trim().to_string();
        Ok(())
    })
}

/// Remove an item from whichever collection currently holds it.
pub fn delete_item(tracker: &Tracker, id: &str) -> Result<(), TrackerError> {
    let _guard = tracker.write_lock();

    for key in [PRODUCT_BACKLOG_KEY, SPRINT_BACKLOG_KEY] {
        let mut items: Vec<BacklogItem> = load_collection(tracker.store(), key)?;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() < before {
            save_collection(tracker.store(), key, &items)?;
            log::debug!("deleted backlog item '{id}'");
            return Ok(());
        }
    }

    Err(TrackerError::not_found(format!("backlog item '{id}'")))
}

/// Stable sort for the backlog tables. String fields compare
/// case-insensitively; `createdAt` compares numerically. Ties keep
/// their original relative order.
pub fn sort_items(
    items: &[BacklogItem],
    criteria: ItemSortCriteria,
    order: SortOrder,
) -> Vec<BacklogItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match criteria {
            ItemSortCriteria::CreatedAt => a.created_at.cmp(&b.created_at),
            ItemSortCriteria::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            ItemSortCriteria::Priority => a
                .priority
                .as_str()
                .to_lowercase()
                .cmp(&b.priority.as_str().to_lowercase()),
            ItemSortCriteria::Status => a
                .status
                .as_str()
                .to_lowercase()
                .cmp(&b.status.as_str().to_lowercase()),
            ItemSortCriteria::Developer => {
                a.developer.to_lowercase().cmp(&b.developer.to_lowercase())
            }
        };
        order.apply(ordering)
    });
    sorted
}

/// Load the item wherever it lives, apply a mutation, and write back
/// only the collection that changed. The collection is persisted only
/// when the mutation returns Ok, so a rejected operation leaves stored
/// state untouched. The mutation sees the stored sprint registry for
/// date-range checks.
fn with_item<F>(tracker: &Tracker, id: &str, mutate: F) -> Result<BacklogItem, TrackerError>
where
    F: FnOnce(&mut BacklogItem, &[Sprint]) -> Result<(), TrackerError>,
{
    let sprints: Vec<Sprint> = load_collection(tracker.store(), SPRINTS_KEY)?;

    for key in [SPRINT_BACKLOG_KEY, PRODUCT_BACKLOG_KEY] {
        let mut items: Vec<BacklogItem> = load_collection(tracker.store(), key)?;
        if let Some(item) = items.iter_mut().find(|item| item.id == id) {
            mutate(item, &sprints)?;
            let updated = item.clone();
            save_collection(tracker.store(), key, &items)?;
            return Ok(updated);
        }
    }

    Err(TrackerError::not_found(format!("backlog item '{id}'")))
}

fn apply_status(
    item: &mut BacklogItem,
    new_status: ItemStatus,
    completion_date: Option<&str>,
    sprint_context: Option<&str>,
    sprints: &[Sprint],
) -> Result<(), TrackerError> {
    if new_status != ItemStatus::Completed {
        item.status = new_status;
        item.completion_date.clear();
        return Ok(());
    }

    let date_str = completion_date
        .filter(|d| !d.is_empty())
        .ok_or_else(|| TrackerError::validation("completion date is required"))?;
    let date = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| TrackerError::validation(format!("invalid date '{date_str}'")))?;

    let owning_sprint = item
        .sprint
        .as_deref()
        .or(sprint_context)
        .ok_or_else(|| TrackerError::validation("no sprint context for completion"))?;
    let sprint = sprints
        .iter()
        .find(|s| s.name == owning_sprint)
        .ok_or_else(|| TrackerError::not_found(format!("sprint '{owning_sprint}'")))?;

    // A sprint without a usable window cannot validate the date.
    let (start, end) = sprint.date_range().ok_or(TrackerError::OutOfRange)?;
    if date < start || date > end {
        return Err(TrackerError::OutOfRange);
    }

    item.status = ItemStatus::Completed;
    item.completion_date = date_str.to_string();
    item.completed_in_sprint = Some(owning_sprint.to_string());
    Ok(())
}
