//! Query engine entry points.
//!
//! # Responsibility
//! - Narrow a role-visible record set by free text and structured filters.
//! - Coordinate asynchronous searches so only the newest result is applied.

pub mod coordinator;
pub mod query;

pub use coordinator::{SearchCoordinator, SearchOutcome, SearchTicket};
pub use query::{matches_query, search, DateRange, SearchFilters, Searchable};
