//! Document records produced by the upload pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::priority::Priority;
use super::validation::{require, ValidationError};

/// Unique document id assigned at registration.
pub type DocumentId = u64;

str_enum!(
    /// Processing state driven by the upload pipeline.
    DocumentStatus {
        Pending => "pending",
        Processed => "processed",
        Error => "error",
    }
);

impl DocumentStatus {
    /// Whether processing may move a document from `self` to `next`.
    ///
    /// `pending` resolves to `processed` or `error`; a failed document can be
    /// queued again. Re-applying the current status is a no-op.
    pub fn allows(self, next: Self) -> bool {
        self == next
            || matches!(
                (self, next),
                (Self::Pending, Self::Processed)
                    | (Self::Pending, Self::Error)
                    | (Self::Error, Self::Pending)
            )
    }
}

/// Registration payload handed over by the upload flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub summary: String,
    pub department: String,
    pub language: String,
    pub priority: Priority,
    pub deadline: NaiveDate,
    pub keywords: Vec<String>,
    pub assigned_to: String,
    /// Static relevance metadata carried through unchanged.
    pub score: Option<f64>,
}

/// A document known to the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub summary: String,
    pub department: String,
    pub language: String,
    pub status: DocumentStatus,
    pub priority: Priority,
    pub deadline: NaiveDate,
    pub keywords: Vec<String>,
    pub assigned_to: String,
    pub uploaded_on: NaiveDate,
    pub score: Option<f64>,
}

impl Document {
    /// Builds a pending document. Keywords are deduplicated
    /// case-insensitively, keeping first occurrence order.
    pub fn register(
        id: DocumentId,
        new: NewDocument,
        uploaded_on: NaiveDate,
    ) -> Result<Self, ValidationError> {
        require(&new.title, ValidationError::EmptyTitle)?;
        require(&new.department, ValidationError::EmptyDepartment)?;

        let mut keywords: Vec<String> = Vec::with_capacity(new.keywords.len());
        for keyword in new.keywords {
            let keyword = keyword.trim().to_string();
            if keyword.is_empty()
                || keywords
                    .iter()
                    .any(|existing| existing.to_lowercase() == keyword.to_lowercase())
            {
                continue;
            }
            keywords.push(keyword);
        }

        Ok(Self {
            id,
            title: new.title.trim().to_string(),
            summary: new.summary,
            department: new.department.trim().to_string(),
            language: new.language,
            status: DocumentStatus::Pending,
            priority: new.priority,
            deadline: new.deadline,
            keywords,
            assigned_to: new.assigned_to,
            uploaded_on,
            score: new.score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, DocumentStatus, NewDocument};
    use crate::model::priority::Priority;
    use crate::model::ValidationError;
    use chrono::NaiveDate;

    fn payload() -> NewDocument {
        NewDocument {
            title: "Vendor Contract - Track Maintenance".to_string(),
            summary: "Annual maintenance contract".to_string(),
            department: "Engineering".to_string(),
            language: "English".to_string(),
            priority: Priority::Medium,
            deadline: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            keywords: vec![
                "contract".to_string(),
                "Contract".to_string(),
                " ".to_string(),
                "track".to_string(),
            ],
            assigned_to: "Procurement Team".to_string(),
            score: Some(0.87),
        }
    }

    #[test]
    fn register_starts_pending_with_deduplicated_keywords() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let doc = Document::register(7, payload(), today).unwrap();
        assert_eq!(doc.id, 7);
        assert_eq!(doc.status, DocumentStatus::Pending);
        assert_eq!(doc.keywords, vec!["contract", "track"]);
        assert_eq!(doc.uploaded_on, today);
    }

    #[test]
    fn register_requires_title_and_department() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let mut missing_department = payload();
        missing_department.department = String::new();
        assert_eq!(
            Document::register(1, missing_department, today).unwrap_err(),
            ValidationError::EmptyDepartment
        );
    }

    #[test]
    fn processing_transitions() {
        use DocumentStatus::*;
        assert!(Pending.allows(Processed));
        assert!(Pending.allows(Error));
        assert!(Error.allows(Pending));
        assert!(!Processed.allows(Pending));
        assert!(!Error.allows(Processed));
    }
}
