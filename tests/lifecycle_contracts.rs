use sprintlens::commands::backlog::{
    create_item, delete_item, list_product_backlog, list_sprint_items, move_to_product_backlog,
    set_completion_time, set_estimated_time, set_status, transfer_to_sprint,
};
use sprintlens::commands::charts::{
    get_burndown_data, get_developer_totals, get_sprint_totals, get_status_summary,
};
use sprintlens::commands::sprint::{create_sprint, delete_sprint, get_sprint, update_sprint};
use sprintlens::models::config::TrackerConfig;
use sprintlens::models::item::{ItemStatus, Priority};
use sprintlens::models::sprint::{Sprint, SprintProgress};
use sprintlens::{Tracker, TrackerError};
use tempfile::TempDir;

fn open_tracker() -> (TempDir, Tracker) {
    let _ = env_logger::builder().is_test(true).try_init();
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let workspace_path = temp_dir.path().to_string_lossy().to_string();
    let tracker = Tracker::open(&workspace_path).expect("open tracker");
    (temp_dir, tracker)
}

fn sprint(name: &str, start: &str, end: &str) -> Sprint {
    Sprint {
        start_date: start.to_string(),
        end_date: end.to_string(),
        ..Sprint::new(name)
    }
}

#[test]
fn full_item_lifecycle_flows_through_one_sprint() {
    let (_tmp, tracker) = open_tracker();
    create_sprint(&tracker, sprint("Sprint 1", "2024-01-01", "2024-01-05")).expect("sprint");

    let item = create_item(&tracker, "Implement login", Priority::High, "Daksh").expect("create");
    assert_eq!(get_status_summary(&tracker).expect("summary").awaiting_action, 1);

    transfer_to_sprint(&tracker, &item.id, "Sprint 1").expect("transfer");
    set_estimated_time(&tracker, &item.id, "1w").expect("estimate");
    set_status(&tracker, &item.id, ItemStatus::UnderDevelopment, None, None).expect("start");
    set_completion_time(&tracker, &item.id, "1w 1d").expect("log time");
    set_status(
        &tracker,
        &item.id,
        ItemStatus::Completed,
        Some("2024-01-03"),
        None,
    )
    .expect("complete");

    let items = list_sprint_items(&tracker, "Sprint 1").expect("list");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].status, ItemStatus::Completed);
    assert_eq!(items[0].completed_in_sprint.as_deref(), Some("Sprint 1"));

    let series = get_burndown_data(&tracker, "Sprint 1").expect("burndown");
    let remaining: Vec<f64> = series.iter().map(|p| p.remaining).collect();
    let ideal: Vec<f64> = series.iter().map(|p| p.ideal).collect();
    assert_eq!(remaining, vec![40.0, 40.0, 0.0, 0.0, 0.0]);
    assert_eq!(ideal, vec![40.0, 32.0, 24.0, 16.0, 8.0]);

    let totals = get_sprint_totals(&tracker, "Sprint 1").expect("totals");
    assert_eq!(totals.estimated, 40.0);
    assert_eq!(totals.actual, 48.0);
}

#[test]
fn state_survives_reopening_the_workspace() {
    let (tmp, tracker) = open_tracker();
    let workspace_path = tmp.path().to_string_lossy().to_string();

    create_sprint(&tracker, sprint("Sprint 2", "2024-03-01", "2024-03-14")).expect("sprint");
    let item = create_item(&tracker, "Persisted task", Priority::Low, "Simran").expect("create");
    transfer_to_sprint(&tracker, &item.id, "Sprint 2").expect("transfer");
    drop(tracker);

    let reopened = Tracker::open(&workspace_path).expect("reopen");
    let loaded = get_sprint(&reopened, "Sprint 2").expect("sprint");
    assert_eq!(loaded.end_date, "2024-03-14");

    let items = list_sprint_items(&reopened, "Sprint 2").expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Persisted task");
}

#[test]
fn duplicate_sprint_name_is_rejected_without_touching_the_registry() {
    let (_tmp, tracker) = open_tracker();
    create_sprint(&tracker, sprint("Sprint 1", "2024-01-01", "2024-01-05")).expect("sprint");

    let err = create_sprint(&tracker, sprint("Sprint 1", "2024-02-01", "2024-02-05"))
        .expect_err("duplicate");
    assert!(matches!(err, TrackerError::DuplicateName(_)));
    assert_eq!(get_sprint(&tracker, "Sprint 1").expect("get").start_date, "2024-01-01");

    // Editing the same record stays allowed.
    let mut edited = sprint("Sprint 1", "2024-01-01", "2024-01-08");
    edited.progress = SprintProgress::InProgress;
    update_sprint(&tracker, edited).expect("update");
    assert_eq!(get_sprint(&tracker, "Sprint 1").expect("get").end_date, "2024-01-08");
}

#[test]
fn items_in_progress_cannot_be_pulled_back_to_the_product_backlog() {
    let (_tmp, tracker) = open_tracker();
    create_sprint(&tracker, sprint("Sprint 1", "2024-01-01", "2024-01-05")).expect("sprint");
    let item = create_item(&tracker, "Busy task", Priority::Medium, "Gaurav").expect("create");
    transfer_to_sprint(&tracker, &item.id, "Sprint 1").expect("transfer");
    set_status(&tracker, &item.id, ItemStatus::UnderDevelopment, None, None).expect("start");

    let err = move_to_product_backlog(&tracker, &item.id).expect_err("move back");
    assert!(matches!(err, TrackerError::Validation(_)));

    // A status reset unlocks the move.
    set_status(&tracker, &item.id, ItemStatus::AwaitingAction, None, None).expect("reset");
    move_to_product_backlog(&tracker, &item.id).expect("move back");
    assert_eq!(list_product_backlog(&tracker).expect("list").len(), 1);
    assert!(list_sprint_items(&tracker, "Sprint 1").expect("list").is_empty());
}

#[test]
fn developer_hours_accumulate_across_items() {
    let (_tmp, tracker) = open_tracker();
    create_sprint(&tracker, sprint("Sprint 1", "2024-01-01", "2024-01-31")).expect("sprint");

    let config = TrackerConfig::default();
    assert!(config.knows_developer("Daksh"));

    for token in ["1d", "4h"] {
        let item = create_item(&tracker, "Chore", Priority::Low, "Daksh").expect("create");
        transfer_to_sprint(&tracker, &item.id, "Sprint 1").expect("transfer");
        set_completion_time(&tracker, &item.id, token).expect("log time");
    }

    let totals = get_developer_totals(&tracker, Some("Sprint 1")).expect("totals");
    assert_eq!(totals.get("Daksh"), Some(&12.0));
    assert_eq!(totals.len(), 1);
}

#[test]
fn deleting_a_sprint_orphans_its_items_but_charts_stay_defensive() {
    let (_tmp, tracker) = open_tracker();
    create_sprint(&tracker, sprint("Sprint 1", "2024-01-01", "2024-01-05")).expect("sprint");
    let item = create_item(&tracker, "Orphan", Priority::Medium, "Shaurya").expect("create");
    transfer_to_sprint(&tracker, &item.id, "Sprint 1").expect("transfer");

    delete_sprint(&tracker, "Sprint 1").expect("delete sprint");

    // The item keeps its reference; the burndown degrades to empty.
    let items = list_sprint_items(&tracker, "Sprint 1").expect("items");
    assert_eq!(items.len(), 1);
    assert!(get_burndown_data(&tracker, "Sprint 1").expect("burndown").is_empty());

    // Completing against the dangling reference reports the missing sprint.
    let err = set_status(
        &tracker,
        &item.id,
        ItemStatus::Completed,
        Some("2024-01-03"),
        None,
    )
    .expect_err("complete");
    assert!(matches!(err, TrackerError::NotFound(_)));

    delete_item(&tracker, &item.id).expect("delete item");
    assert!(list_sprint_items(&tracker, "Sprint 1").expect("items").is_empty());
}

#[test]
fn custom_catalogs_replace_the_default_dropdowns() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config: TrackerConfig = serde_json::from_str(
        r#"{"sprintNames": ["Iteration A"], "developers": ["Alice", "Bob"]}"#,
    )
    .expect("config");
    let store = sprintlens::store::MemoryStore::new();
    let tracker = Tracker::new(Box::new(store), config);

    create_sprint(&tracker, sprint("Iteration A", "2024-05-01", "2024-05-10")).expect("sprint");
    assert!(matches!(
        create_sprint(&tracker, Sprint::new("Sprint 1")),
        Err(TrackerError::Validation(_))
    ));

    create_item(&tracker, "Task", Priority::High, "Alice").expect("create");
    assert!(matches!(
        create_item(&tracker, "Task", Priority::High, "Daksh"),
        Err(TrackerError::Validation(_))
    ));
}
