//! Validation and parse errors for creation payloads.

use thiserror::Error;

/// A required field was missing or blank on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("assignee must not be empty")]
    EmptyAssignee,
    #[error("department must not be empty")]
    EmptyDepartment,
    #[error("message must not be empty")]
    EmptyMessage,
}

/// A string did not name any variant of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported {field} value `{value}`")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
}

pub(crate) fn require(value: &str, error: ValidationError) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require, ValidationError};

    #[test]
    fn require_rejects_blank_values() {
        assert_eq!(
            require("   ", ValidationError::EmptyTitle),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(require("Review", ValidationError::EmptyTitle), Ok(()));
    }
}
