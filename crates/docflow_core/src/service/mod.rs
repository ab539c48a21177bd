//! Lifecycle engines.
//!
//! # Responsibility
//! - Each engine is the only writer of its collection and enforces that
//!   collection's state machine.
//! - Engines are storage-agnostic; they talk to a `RecordRepository`.

pub mod document_service;
pub mod notification_service;
pub mod task_service;

pub use document_service::DocumentService;
pub use notification_service::NotificationService;
pub use task_service::TaskService;
