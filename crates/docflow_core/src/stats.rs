//! Read-only counters derived from the current collections.
//!
//! Inputs are the same visibility-scoped, filtered lists the console shows,
//! and results are recomputed on every call, so counters cannot drift from
//! the records they describe.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::document::{Document, DocumentStatus};
use crate::model::notification::Notification;
use crate::model::task::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Rate requested over an empty collection.
    #[error("rate denominator is zero")]
    DivisionGuard,
}

/// Task totals by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl TaskCounts {
    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
            TaskStatus::Overdue => self.overdue,
        }
    }
}

/// Counts tasks by their `status` field.
///
/// Callers pass tasks with observable status already applied, which is what
/// the task engine's list operations return.
pub fn count_by_status(tasks: &[Task]) -> TaskCounts {
    tasks.iter().fold(TaskCounts::default(), |mut counts, task| {
        counts.total += 1;
        match task.status {
            TaskStatus::Pending => counts.pending += 1,
            TaskStatus::InProgress => counts.in_progress += 1,
            TaskStatus::Completed => counts.completed += 1,
            TaskStatus::Overdue => counts.overdue += 1,
        }
        counts
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCounts {
    pub total: usize,
    pub unread: usize,
    pub urgent: usize,
    pub action_required: usize,
}

pub fn count_unread(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

/// Urgent-or-high, the same predicate as the urgent view.
pub fn count_urgent(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| n.is_urgent()).count()
}

pub fn count_action_required(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| n.action_required).count()
}

pub fn notification_counts(notifications: &[Notification]) -> NotificationCounts {
    NotificationCounts {
        total: notifications.len(),
        unread: count_unread(notifications),
        urgent: count_urgent(notifications),
        action_required: count_action_required(notifications),
    }
}

/// Document totals for the dashboard tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub total: usize,
    pub pending: usize,
    pub processed: usize,
    pub errored: usize,
    /// Distinct departments, compared case-insensitively.
    pub departments: usize,
}

impl DocumentStats {
    pub fn from_documents(documents: &[Document]) -> Self {
        let mut stats = Self {
            total: documents.len(),
            ..Self::default()
        };
        let mut departments = HashSet::new();
        for document in documents {
            match document.status {
                DocumentStatus::Pending => stats.pending += 1,
                DocumentStatus::Processed => stats.processed += 1,
                DocumentStatus::Error => stats.errored += 1,
            }
            departments.insert(document.department.to_lowercase());
        }
        stats.departments = departments.len();
        stats
    }
}

/// `round(processed / total * 100)`, failing on an empty collection.
pub fn checked_processing_rate(stats: &DocumentStats) -> Result<u32, StatsError> {
    if stats.total == 0 {
        return Err(StatsError::DivisionGuard);
    }
    let rate = (stats.processed as f64 / stats.total as f64 * 100.0).round();
    Ok(rate as u32)
}

/// Processing rate in percent; `0` when there are no documents.
pub fn processing_rate(stats: &DocumentStats) -> u32 {
    checked_processing_rate(stats).unwrap_or_else(|err| {
        debug!("event=processing_rate module=stats status=noop reason={err}");
        0
    })
}

#[cfg(test)]
mod tests {
    use super::{checked_processing_rate, processing_rate, DocumentStats, StatsError};

    #[test]
    fn processing_rate_guards_empty_collection() {
        let empty = DocumentStats::default();
        assert_eq!(processing_rate(&empty), 0);
        assert_eq!(checked_processing_rate(&empty), Err(StatsError::DivisionGuard));
    }

    #[test]
    fn processing_rate_rounds_to_nearest_percent() {
        let stats = DocumentStats {
            total: 1247,
            processed: 1224,
            ..DocumentStats::default()
        };
        assert_eq!(processing_rate(&stats), 98);

        let half = DocumentStats {
            total: 8,
            processed: 4,
            ..DocumentStats::default()
        };
        assert_eq!(processing_rate(&half), 50);

        let third = DocumentStats {
            total: 3,
            processed: 2,
            ..DocumentStats::default()
        };
        assert_eq!(processing_rate(&third), 67);
    }
}
