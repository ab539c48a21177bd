//! Task records and their status vocabulary.
//!
//! # Invariants
//! - `created_date` is set once at creation.
//! - Stored `status` only changes through `TaskStatus::allows`.
//! - `overdue` is derived from `due_date`, so the observable status of a
//!   task past its deadline is `overdue` unless it was completed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::document::DocumentId;
use super::priority::Priority;
use super::validation::{require, ValidationError};

/// Monotonically assigned task id.
pub type TaskId = u64;

str_enum!(
    /// Task lifecycle state.
    TaskStatus {
        Pending => "pending",
        InProgress => "in-progress",
        Completed => "completed",
        Overdue => "overdue",
    }
);

impl TaskStatus {
    /// Terminal states have no outgoing transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Overdue)
    }

    /// Whether an explicit status change from `self` to `next` is legal.
    ///
    /// Re-applying the current status is accepted as a no-op. `overdue` is
    /// never a legal explicit target: only the deadline produces it.
    pub fn allows(self, next: Self) -> bool {
        self == next
            || matches!(
                (self, next),
                (Self::Pending, Self::InProgress) | (Self::InProgress, Self::Completed)
            )
    }
}

/// Creation payload for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    /// Filled from the acting session when blank.
    pub assigned_by: String,
    pub department: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
    pub document_id: Option<DocumentId>,
}

impl NewTask {
    /// Creates a payload with the two required fields and defaults elsewhere.
    pub fn new(title: impl Into<String>, assigned_to: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            assigned_to: assigned_to.into(),
            assigned_by: String::new(),
            department: String::new(),
            priority: Priority::default(),
            due_date,
            document_id: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.title, ValidationError::EmptyTitle)?;
        require(&self.assigned_to, ValidationError::EmptyAssignee)
    }
}

/// A unit of document-related work assigned to someone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub assigned_by: String,
    pub department: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: NaiveDate,
    pub created_date: DateTime<Utc>,
    /// Weak reference, lookup only.
    pub document_id: Option<DocumentId>,
    pub comment_count: u32,
}

impl Task {
    /// Builds a pending task from a validated payload.
    pub fn create(id: TaskId, new: NewTask, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        new.validate()?;
        Ok(Self {
            id,
            title: new.title.trim().to_string(),
            description: new.description,
            assigned_to: new.assigned_to.trim().to_string(),
            assigned_by: new.assigned_by,
            department: new.department.trim().to_string(),
            priority: new.priority,
            status: TaskStatus::Pending,
            due_date: new.due_date,
            created_date: now,
            document_id: new.document_id,
            comment_count: 0,
        })
    }

    /// Status as observed on `today`.
    pub fn observed_status(&self, today: NaiveDate) -> TaskStatus {
        if self.status != TaskStatus::Completed && today > self.due_date {
            return TaskStatus::Overdue;
        }
        self.status
    }

    /// Returns a copy whose `status` field carries the observed status.
    pub fn observed(&self, today: NaiveDate) -> Self {
        let mut task = self.clone();
        task.status = self.observed_status(today);
        task
    }
}
