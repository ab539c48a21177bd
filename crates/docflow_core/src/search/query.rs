//! In-memory keyword search.
//!
//! # Invariants
//! - Visibility is applied before any query or filter: a search never
//!   surfaces a record the role cannot see.
//! - Output preserves input order; there is no relevance re-ranking.
//! - Matching is a pure function of its inputs, so repeated calls on an
//!   unchanged collection return identical results.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::document::Document;
use crate::model::filter::DepartmentFilter;
use crate::model::role::Role;
use crate::model::task::Task;
use crate::visibility::{is_visible, Scoped};

/// A record the query engine can match against.
pub trait Searchable: Scoped {
    fn title(&self) -> &str;
    /// Summary for documents, description for tasks.
    fn body(&self) -> &str;
    fn keywords(&self) -> &[String] {
        &[]
    }
    /// Day used by the date-range filter.
    fn dated_on(&self) -> NaiveDate;
}

impl Searchable for Document {
    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.summary
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn dated_on(&self) -> NaiveDate {
        self.uploaded_on
    }
}

impl Searchable for Task {
    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.description
    }

    fn dated_on(&self) -> NaiveDate {
        self.created_date.date_naive()
    }
}

str_enum!(
    /// Calendar window relative to today.
    DateRange {
        All => "all",
        Today => "today",
        Week => "week",
        Month => "month",
        Quarter => "quarter",
    }
);

impl Default for DateRange {
    fn default() -> Self {
        Self::All
    }
}

impl DateRange {
    /// Whether `date` falls in the same calendar window as `today`.
    ///
    /// Weeks are ISO weeks (Monday start); quarters are calendar quarters.
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Today => date == today,
            Self::Week => date.iso_week() == today.iso_week(),
            Self::Month => date.year() == today.year() && date.month() == today.month(),
            Self::Quarter => {
                date.year() == today.year() && date.month0() / 3 == today.month0() / 3
            }
        }
    }
}

/// Structured search filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub department: DepartmentFilter,
    pub date_range: DateRange,
}

/// Case-insensitive substring match on title, body and each keyword.
///
/// A blank query matches every record.
pub fn matches_query<T: Searchable + ?Sized>(record: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record.title().to_lowercase().contains(&needle)
        || record.body().to_lowercase().contains(&needle)
        || record
            .keywords()
            .iter()
            .any(|keyword| keyword.to_lowercase().contains(&needle))
}

/// Runs a search over `records` for `role`.
///
/// Stages, in order: visibility, department filter, date range, query.
pub fn search<T>(
    role: Role,
    records: &[T],
    query: &str,
    filters: &SearchFilters,
    today: NaiveDate,
) -> Vec<T>
where
    T: Searchable + Clone,
{
    records
        .iter()
        .filter(|record| is_visible(role, record.department()))
        .filter(|record| filters.department.matches(record.department()))
        .filter(|record| filters.date_range.contains(record.dated_on(), today))
        .filter(|record| matches_query(*record, query))
        .cloned()
        .collect()
}
