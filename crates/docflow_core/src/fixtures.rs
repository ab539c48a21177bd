//! Demo collections for a fresh console.
//!
//! Records go through the normal creation and transition paths, so every
//! invariant holds for seeded data too. Dates are relative to the console
//! clock.

use chrono::{Duration, NaiveDate};
use log::info;
use serde::Serialize;

use crate::console::Console;
use crate::error::ConsoleResult;
use crate::model::document::NewDocument;
use crate::model::notification::{NewNotification, NotificationKind};
use crate::model::priority::Priority;
use crate::model::role::Role;
use crate::model::task::NewTask;

/// How many records `seed_demo` created per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub documents: usize,
    pub tasks: usize,
    pub notifications: usize,
}

/// Loads the sample documents, tasks and notifications into `console`.
///
/// Does not touch the session. Seeding an already populated console appends
/// another copy with fresh ids.
pub fn seed_demo(console: &Console) -> ConsoleResult<SeedSummary> {
    let today = console.clock.today();
    let documents = seed_documents(console, today)?;
    let tasks = seed_tasks(console, today, &documents)?;
    let notifications = seed_notifications(console, &documents, &tasks)?;

    let summary = SeedSummary {
        documents: documents.len(),
        tasks: tasks.len(),
        notifications,
    };
    info!(
        "event=seed_demo module=fixtures status=ok documents={} tasks={} notifications={}",
        summary.documents, summary.tasks, summary.notifications
    );
    Ok(summary)
}

fn day_offset(today: NaiveDate, days: i64) -> NaiveDate {
    today + Duration::days(days)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn seed_documents(console: &Console, today: NaiveDate) -> ConsoleResult<Vec<u64>> {
    let samples = [
        (
            NewDocument {
                title: "Safety Protocol Update - Malayalam Version".to_string(),
                summary: "Updated safety protocols for platform operations with new emergency procedures"
                    .to_string(),
                department: "Engineering".to_string(),
                language: "Malayalam + English".to_string(),
                priority: Priority::High,
                deadline: day_offset(today, 5),
                keywords: strings(&["safety", "emergency", "platform"]),
                assigned_to: "Safety Team".to_string(),
                score: Some(0.95),
            },
            true,
        ),
        (
            NewDocument {
                title: "Vendor Contract - Track Maintenance".to_string(),
                summary: "Annual maintenance contract for track systems and signaling equipment"
                    .to_string(),
                department: "Engineering".to_string(),
                language: "English".to_string(),
                priority: Priority::Medium,
                deadline: day_offset(today, 10),
                keywords: strings(&["contract", "maintenance", "track"]),
                assigned_to: "Procurement Team".to_string(),
                score: Some(0.87),
            },
            false,
        ),
        (
            NewDocument {
                title: "HR Policy Amendment - Leave Structure".to_string(),
                summary: "Revised leave policies including new maternity and paternity benefits"
                    .to_string(),
                department: "HR".to_string(),
                language: "English".to_string(),
                priority: Priority::Low,
                deadline: day_offset(today, 15),
                keywords: strings(&["policy", "leave", "benefits"]),
                assigned_to: "HR Department".to_string(),
                score: Some(0.82),
            },
            true,
        ),
        (
            NewDocument {
                title: "Quarterly Budget Allocation".to_string(),
                summary: "Budget allocation for rolling stock maintenance and station upgrades"
                    .to_string(),
                department: "Finance".to_string(),
                language: "English".to_string(),
                priority: Priority::Medium,
                deadline: day_offset(today, 20),
                keywords: strings(&["budget", "allocation", "quarterly"]),
                assigned_to: "Finance Analyst".to_string(),
                score: None,
            },
            false,
        ),
    ];

    let mut ids = Vec::with_capacity(samples.len());
    for (new, processed) in samples {
        let document = console.documents.register(new)?;
        if processed {
            console.documents.complete_processing(document.id)?;
        }
        ids.push(document.id);
    }
    Ok(ids)
}

struct TaskSample {
    new: NewTask,
    started: bool,
    completed: bool,
    comments: u32,
}

fn seed_tasks(console: &Console, today: NaiveDate, documents: &[u64]) -> ConsoleResult<Vec<u64>> {
    let task = |title: &str,
                description: &str,
                assigned_to: &str,
                assigned_by: &str,
                department: &str,
                priority: Priority,
                due_in: i64,
                document: usize| NewTask {
        title: title.to_string(),
        description: description.to_string(),
        assigned_to: assigned_to.to_string(),
        assigned_by: assigned_by.to_string(),
        department: department.to_string(),
        priority,
        due_date: day_offset(today, due_in),
        document_id: documents.get(document).copied(),
    };

    let samples = vec![
        TaskSample {
            new: task(
                "Review Safety Protocol Implementation",
                "Review and approve the new safety protocols for platform operations. Ensure compliance with latest safety standards.",
                "Safety Team Lead",
                "Station Manager",
                "Engineering",
                Priority::High,
                10,
                0,
            ),
            started: false,
            completed: false,
            comments: 3,
        },
        TaskSample {
            new: task(
                "Vendor Contract Analysis",
                "Analyze vendor proposals and prepare recommendation report for track maintenance contract.",
                "Procurement Officer",
                "Engineering Head",
                "Engineering",
                Priority::Medium,
                15,
                1,
            ),
            started: true,
            completed: false,
            comments: 1,
        },
        TaskSample {
            new: task(
                "HR Policy Communication",
                "Communicate new leave policy changes to all departments and update employee handbook.",
                "HR Coordinator",
                "HR Manager",
                "HR",
                Priority::Low,
                20,
                2,
            ),
            started: true,
            completed: true,
            comments: 5,
        },
    ];

    // Seeding acts with full visibility; the session is left alone.
    let actor = Role::Admin;
    let mut ids = Vec::with_capacity(samples.len());
    for sample in samples {
        let created = console.tasks.create_task(sample.new)?;
        if sample.started {
            console.tasks.start_task(actor, created.id)?;
        }
        if sample.completed {
            console.tasks.complete_task(actor, created.id)?;
        }
        for _ in 0..sample.comments {
            console.tasks.add_comment(actor, created.id)?;
        }
        ids.push(created.id);
    }
    Ok(ids)
}

fn seed_notifications(console: &Console, documents: &[u64], tasks: &[u64]) -> ConsoleResult<usize> {
    let samples = [
        (
            NewNotification {
                kind: NotificationKind::Deadline,
                title: "Urgent: Safety Protocol Review Due".to_string(),
                message: "Safety protocol document review is due in 2 days. Immediate action required for compliance."
                    .to_string(),
                priority: Priority::Urgent,
                action_required: true,
                department: Some("Engineering".to_string()),
                related_id: tasks.first().copied(),
            },
            false,
        ),
        (
            NewNotification {
                kind: NotificationKind::Document,
                title: "New Document Processed".to_string(),
                message: "Malayalam safety manual has been successfully processed and is ready for review."
                    .to_string(),
                priority: Priority::Medium,
                action_required: false,
                department: Some("Engineering".to_string()),
                related_id: documents.first().copied(),
            },
            false,
        ),
        (
            NewNotification {
                kind: NotificationKind::Task,
                title: "Task Assignment".to_string(),
                message: "You have been assigned a new task: 'Vendor Contract Analysis' by Engineering Head."
                    .to_string(),
                priority: Priority::Medium,
                action_required: true,
                department: Some("Engineering".to_string()),
                related_id: tasks.get(1).copied(),
            },
            true,
        ),
        (
            NewNotification {
                kind: NotificationKind::Approval,
                title: "Document Approval Required".to_string(),
                message: "HR Policy Amendment requires your approval before implementation."
                    .to_string(),
                priority: Priority::High,
                action_required: true,
                department: Some("HR".to_string()),
                related_id: documents.get(2).copied(),
            },
            true,
        ),
        (
            NewNotification {
                kind: NotificationKind::System,
                title: "System Update Complete".to_string(),
                message: "Document intelligence system has been updated with improved Malayalam translation capabilities."
                    .to_string(),
                priority: Priority::Low,
                action_required: false,
                department: None,
                related_id: None,
            },
            true,
        ),
    ];

    let mut created = 0;
    for (new, read) in samples {
        let notification = console.notifications.push(new)?;
        if read {
            console.notifications.mark_read(Role::Admin, notification.id)?;
        }
        created += 1;
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::seed_demo;
    use crate::clock::FixedClock;
    use crate::config::ConsoleConfig;
    use crate::console::Console;
    use crate::model::document::DocumentStatus;
    use crate::model::filter::TaskFilter;
    use crate::model::notification::ViewMode;
    use crate::model::role::Role;
    use crate::model::task::TaskStatus;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    #[test]
    fn seeds_every_collection_without_opening_a_session() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap());
        let console = Console::new(&ConsoleConfig::default(), Arc::new(clock));
        let summary = seed_demo(&console).unwrap();
        assert_eq!((summary.documents, summary.tasks, summary.notifications), (4, 3, 5));
        assert!(console.session().unwrap().is_none());

        console.set_role(Role::Admin).unwrap();
        let documents = console.list_documents(false).unwrap();
        let statuses: Vec<_> = documents.iter().map(|d| d.status).collect();
        assert_eq!(
            statuses,
            vec![
                DocumentStatus::Processed,
                DocumentStatus::Pending,
                DocumentStatus::Processed,
                DocumentStatus::Pending
            ]
        );

        let tasks = console.list_tasks(&TaskFilter::default()).unwrap();
        let statuses: Vec<_> = tasks.iter().map(|t| t.status).collect();
        assert_eq!(
            statuses,
            vec![TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed]
        );
        assert_eq!(tasks[2].comment_count, 5);

        let unread = console.list_notifications(ViewMode::Unread).unwrap();
        assert_eq!(unread.len(), 2);
    }
}
