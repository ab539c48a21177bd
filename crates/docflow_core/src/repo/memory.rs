//! `RwLock`-guarded in-memory collection.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{CoreError, CoreResult};
use crate::repo::{Record, RecordRepository};

#[derive(Debug)]
struct Inner<T> {
    next_id: u64,
    records: Vec<T>,
}

/// In-process owner of one record collection.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                records: Vec::new(),
            }),
        }
    }

    fn read(&self) -> CoreResult<RwLockReadGuard<'_, Inner<T>>> {
        self.inner
            .read()
            .map_err(|_| CoreError::LockPoisoned(T::COLLECTION))
    }

    fn write(&self) -> CoreResult<RwLockWriteGuard<'_, Inner<T>>> {
        self.inner
            .write()
            .map_err(|_| CoreError::LockPoisoned(T::COLLECTION))
    }
}

impl<T: Record> RecordRepository for InMemoryRepository<T> {
    type Item = T;

    fn insert_with<F>(&self, build: F) -> CoreResult<T>
    where
        F: FnOnce(u64) -> CoreResult<T>,
    {
        let mut inner = self.write()?;
        let id = inner.next_id;
        inner.next_id += 1;
        let record = build(id)?;
        inner.records.push(record.clone());
        Ok(record)
    }

    fn get(&self, id: u64) -> CoreResult<Option<T>> {
        let inner = self.read()?;
        Ok(inner.records.iter().find(|record| record.id() == id).cloned())
    }

    fn list(&self) -> CoreResult<Vec<T>> {
        Ok(self.read()?.records.clone())
    }

    fn update_with<F, R>(&self, id: u64, apply: F) -> CoreResult<R>
    where
        F: FnOnce(&mut T) -> CoreResult<R>,
    {
        let mut inner = self.write()?;
        let record = inner
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| CoreError::not_found(T::COLLECTION, id))?;

        // Work on a copy so a failing closure leaves no partial change.
        let mut draft = record.clone();
        let outcome = apply(&mut draft)?;
        *record = draft;
        Ok(outcome)
    }

    fn update_where<P, F>(&self, select: P, mut apply: F) -> CoreResult<usize>
    where
        P: Fn(&T) -> bool,
        F: FnMut(&mut T) -> bool,
    {
        let mut inner = self.write()?;
        let mut changed = 0;
        for record in inner.records.iter_mut() {
            if select(record) && apply(record) {
                changed += 1;
            }
        }
        Ok(changed)
    }

    fn remove_with<F>(&self, id: u64, check: F) -> CoreResult<T>
    where
        F: FnOnce(&T) -> CoreResult<()>,
    {
        let mut inner = self.write()?;
        let index = inner
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| CoreError::not_found(T::COLLECTION, id))?;
        check(&inner.records[index])?;
        Ok(inner.records.remove(index))
    }
}
