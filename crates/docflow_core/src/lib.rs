//! Workflow state core for the document console.
//! This crate is the single source of truth for visibility, lifecycle and
//! aggregate invariants; presentation layers only render what it returns.

#[macro_use]
mod macros;

pub mod clock;
pub mod config;
pub mod console;
pub mod error;
pub mod fixtures;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod session;
pub mod stats;
pub mod visibility;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, ConsoleConfig, LoggingConfig};
pub use console::Console;
pub use error::{Collection, ConsoleError, ConsoleResult, CoreError, CoreResult};
pub use fixtures::{seed_demo, SeedSummary};
pub use logging::{init_logging, logging_status, LoggingError};
pub use model::document::{Document, DocumentId, DocumentStatus, NewDocument};
pub use model::filter::{DepartmentFilter, TaskFilter};
pub use model::notification::{
    NewNotification, Notification, NotificationId, NotificationKind, ViewMode,
};
pub use model::priority::Priority;
pub use model::role::{Role, Section};
pub use model::task::{NewTask, Task, TaskId, TaskStatus};
pub use model::{ParseEnumError, ValidationError};
pub use search::{DateRange, SearchFilters, SearchOutcome};
pub use session::Session;
pub use stats::{DocumentStats, NotificationCounts, StatsError, TaskCounts};
pub use visibility::is_visible;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
