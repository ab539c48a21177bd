use chrono::{TimeZone, Utc};
use docflow_core::stats::{checked_processing_rate, processing_rate};
use docflow_core::{
    seed_demo, Console, ConsoleConfig, ConsoleError, DocumentStats, FixedClock, Role, Section,
    StatsError, TaskFilter, ViewMode,
};
use serde_json::json;
use std::sync::Arc;

fn console() -> Console {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap());
    Console::new(&ConsoleConfig::default(), Arc::new(clock))
}

#[test]
fn processing_rate_of_an_empty_collection_is_zero() {
    let empty = DocumentStats::default();
    assert_eq!(processing_rate(&empty), 0);
    assert_eq!(checked_processing_rate(&empty), Err(StatsError::DivisionGuard));

    let console = console();
    console.set_role(Role::Hr).unwrap();
    assert_eq!(console.processing_rate(true).unwrap(), 0);
}

#[test]
fn stats_follow_the_role_scoped_collections() {
    let console = console();
    seed_demo(&console).unwrap();

    console.set_role(Role::Admin).unwrap();
    let all = console.document_stats(false).unwrap();
    assert_eq!((all.total, all.processed, all.pending), (4, 2, 2));
    assert_eq!(all.departments, 3);
    assert_eq!(console.processing_rate(false).unwrap(), 50);

    console.set_role(Role::Hr).unwrap();
    let hr = console.document_stats(true).unwrap();
    assert_eq!((hr.total, hr.processed, hr.departments), (1, 1, 1));
    assert_eq!(console.processing_rate(true).unwrap(), 100);
    assert_eq!(
        console.document_stats(false).unwrap_err(),
        ConsoleError::Forbidden {
            role: Role::Hr,
            section: Section::Analytics
        }
    );

    let tasks = console.task_stats(&TaskFilter::default()).unwrap();
    assert_eq!((tasks.total, tasks.completed, tasks.pending), (1, 1, 0));

    let notifications = console.notification_stats(ViewMode::All).unwrap();
    assert_eq!(notifications.total, 2);
    assert_eq!(notifications.unread, 0);
}

#[test]
fn stats_never_drift_from_the_collections() {
    let console = console();
    seed_demo(&console).unwrap();
    console.set_role(Role::Engineer).unwrap();

    let before = console.notification_stats(ViewMode::All).unwrap();
    assert_eq!(before.unread, 2);
    console.mark_all_read().unwrap();
    let after = console.notification_stats(ViewMode::All).unwrap();
    assert_eq!(after.unread, 0);
    assert_eq!(after.total, before.total);
}

#[test]
fn records_serialize_with_wire_vocabulary() {
    let console = console();
    seed_demo(&console).unwrap();
    console.set_role(Role::Admin).unwrap();

    let tasks = console.list_tasks(&TaskFilter::default()).unwrap();
    let value = serde_json::to_value(&tasks[1]).unwrap();
    assert_eq!(value["status"], json!("in-progress"));
    assert_eq!(value["priority"], json!("medium"));
    assert_eq!(value["department"], json!("Engineering"));

    let notifications = console.list_notifications(ViewMode::All).unwrap();
    let value = serde_json::to_value(&notifications[0]).unwrap();
    assert_eq!(value["type"], json!("deadline"));
    assert_eq!(value["priority"], json!("urgent"));
    let system = serde_json::to_value(&notifications[4]).unwrap();
    assert_eq!(system["department"], json!(null));

    let counts = serde_json::to_value(console.task_stats(&TaskFilter::default()).unwrap()).unwrap();
    assert_eq!(counts["in_progress"], json!(1));
}
