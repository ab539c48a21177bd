//! Error kinds returned by the workflow core.
//!
//! All of them are local and recoverable: every operation either fully
//! succeeds or fails with one of these without touching state.

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::model::role::{Role, Section};
use crate::model::ValidationError;

pub type CoreResult<T> = Result<T, CoreError>;
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Record collection owned by one lifecycle engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Documents,
    Tasks,
    Notifications,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Documents => "document",
            Self::Tasks => "task",
            Self::Notifications => "notification",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("{collection} not found: {id}")]
    NotFound { collection: Collection, id: u64 },
    #[error("invalid {collection} transition for {id}: {from} -> {to}")]
    InvalidTransition {
        collection: Collection,
        id: u64,
        from: &'static str,
        to: &'static str,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0} collection lock poisoned")]
    LockPoisoned(Collection),
}

impl CoreError {
    pub(crate) fn not_found(collection: Collection, id: u64) -> Self {
        Self::NotFound { collection, id }
    }
}

/// Errors surfaced at the console boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("no active session")]
    NoActiveSession,
    #[error("session lock poisoned")]
    SessionLockPoisoned,
    #[error("role `{role}` may not open the {section} section")]
    Forbidden { role: Role, section: Section },
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ValidationError> for ConsoleError {
    fn from(value: ValidationError) -> Self {
        Self::Core(CoreError::Validation(value))
    }
}
