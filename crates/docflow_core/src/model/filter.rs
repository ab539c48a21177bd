//! Structured display filters shared by list and search views.

use serde::{Deserialize, Serialize};

use super::task::TaskStatus;

/// Department selector: either every department or one named department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentFilter {
    #[default]
    All,
    Named(String),
}

impl DepartmentFilter {
    /// Builds a filter from a UI selection where `"all"` (any case) or a blank
    /// value means no narrowing.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Self::All;
        }
        Self::Named(trimmed.to_string())
    }

    /// Case-insensitive exact match against a record's department.
    ///
    /// A record without a department only passes the `All` selector.
    pub fn matches(&self, department: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => {
                department.is_some_and(|value| value.to_lowercase() == name.to_lowercase())
            }
        }
    }
}

/// Task list filter; both parts are ANDed with role visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub department: DepartmentFilter,
    /// `None` means every status.
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    pub fn matches(&self, department: &str, status: TaskStatus) -> bool {
        self.department.matches(Some(department))
            && self.status.map_or(true, |wanted| wanted == status)
    }
}
