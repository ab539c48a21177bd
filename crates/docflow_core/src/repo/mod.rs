//! Collection ownership contracts and the in-memory implementation.
//!
//! # Responsibility
//! - Own one record collection per repository, guarded by its own lock.
//! - Apply each mutation as a single closure under the write lock, so an id
//!   lookup and the state change it guards are observed together.
//!
//! # Invariants
//! - Ids come from a per-collection counter, start at 1 and are never reused,
//!   not even after removal.
//! - Reads return owned snapshots in insertion order.
//! - No repository call takes a second collection's lock.

pub mod memory;

use crate::error::{Collection, CoreResult};
use crate::model::document::Document;
use crate::model::notification::Notification;
use crate::model::task::Task;

pub use memory::InMemoryRepository;

/// A record stored in a collection.
pub trait Record: Clone + Send + Sync {
    const COLLECTION: Collection;

    fn id(&self) -> u64;
}

impl Record for Document {
    const COLLECTION: Collection = Collection::Documents;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for Task {
    const COLLECTION: Collection = Collection::Tasks;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for Notification {
    const COLLECTION: Collection = Collection::Notifications;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Repository interface used by the lifecycle engines.
pub trait RecordRepository {
    type Item: Record;

    /// Reserves the next id and stores the record `build` produces for it.
    ///
    /// When `build` fails the id is still consumed and nothing is stored.
    fn insert_with<F>(&self, build: F) -> CoreResult<Self::Item>
    where
        F: FnOnce(u64) -> CoreResult<Self::Item>;

    fn get(&self, id: u64) -> CoreResult<Option<Self::Item>>;

    fn list(&self) -> CoreResult<Vec<Self::Item>>;

    /// Runs `apply` against the record under the write lock.
    ///
    /// Fails with `NotFound` for an unknown id. If `apply` fails, the record
    /// is left exactly as it was.
    fn update_with<F, T>(&self, id: u64, apply: F) -> CoreResult<T>
    where
        F: FnOnce(&mut Self::Item) -> CoreResult<T>;

    /// Applies `apply` to every record matching `select` under one write
    /// lock. Returns how many calls reported a change.
    fn update_where<P, F>(&self, select: P, apply: F) -> CoreResult<usize>
    where
        P: Fn(&Self::Item) -> bool,
        F: FnMut(&mut Self::Item) -> bool;

    /// Removes the record once `check` accepts it, under one write lock.
    fn remove_with<F>(&self, id: u64, check: F) -> CoreResult<Self::Item>
    where
        F: FnOnce(&Self::Item) -> CoreResult<()>;
}
