//! Notification records emitted by system events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::priority::Priority;
use super::validation::{require, ValidationError};

/// Unique notification id.
pub type NotificationId = u64;

str_enum!(
    /// Event category a notification was raised for.
    NotificationKind {
        Document => "document",
        Task => "task",
        System => "system",
        Deadline => "deadline",
        Approval => "approval",
    }
);

str_enum!(
    /// Mutually exclusive notification list views.
    ViewMode {
        All => "all",
        Unread => "unread",
        Urgent => "urgent",
    }
);

impl Default for ViewMode {
    fn default() -> Self {
        Self::All
    }
}

/// Payload pushed by the event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub action_required: bool,
    /// `None` for system-origin events visible to every role.
    pub department: Option<String>,
    pub related_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub priority: Priority,
    pub action_required: bool,
    pub department: Option<String>,
    /// Weak reference to the record this event concerns.
    pub related_id: Option<u64>,
}

impl Notification {
    pub fn create(
        id: NotificationId,
        new: NewNotification,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        require(&new.title, ValidationError::EmptyTitle)?;
        require(&new.message, ValidationError::EmptyMessage)?;
        Ok(Self {
            id,
            kind: new.kind,
            title: new.title,
            message: new.message,
            timestamp,
            read: false,
            priority: new.priority,
            action_required: new.action_required,
            department: new
                .department
                .map(|department| department.trim().to_string())
                .filter(|department| !department.is_empty()),
            related_id: new.related_id,
        })
    }

    pub fn is_urgent(&self) -> bool {
        self.priority.is_urgent_or_high()
    }

    /// Marks the notification read. Returns `false` when it already was.
    pub fn mark_read(&mut self) -> bool {
        if self.read {
            return false;
        }
        self.read = true;
        true
    }

    pub fn matches_view(&self, mode: ViewMode) -> bool {
        match mode {
            ViewMode::All => true,
            ViewMode::Unread => !self.read,
            ViewMode::Urgent => self.is_urgent(),
        }
    }
}
