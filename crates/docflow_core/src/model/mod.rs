//! Workflow domain model.
//!
//! # Responsibility
//! - Define the records owned by the lifecycle engines (documents, tasks,
//!   notifications) and the closed vocabularies they use.
//! - Validate creation payloads before they reach a collection.
//!
//! # Invariants
//! - Record ids are assigned by the owning collection and never reused.
//! - Creation timestamps (`created_date`, `timestamp`, `uploaded_on`) never
//!   change after a record is stored.

pub mod document;
pub mod filter;
pub mod notification;
pub mod priority;
pub mod role;
pub mod task;
pub mod validation;

pub use validation::{ParseEnumError, ValidationError};
