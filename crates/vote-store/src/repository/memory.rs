//! In-Memory Repository
//!
//! `BTreeMap`-backed table for tests, with injectable write failures.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::domain::{DomainError, DomainResult, Entity};
use super::traits::Repository;

/// Volatile repository keyed by entity id
pub struct MemoryRepository<T: Entity> {
    rows: RefCell<BTreeMap<T::Id, T>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self {
            rows: RefCell::new(BTreeMap::new()),
            fail_writes: Cell::new(false),
            writes: Cell::new(0),
        }
    }
}

impl<T: Entity> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `rows`, bypassing the write counter
    pub fn with_rows(rows: impl IntoIterator<Item = T>) -> Self {
        let repo = Self::new();
        repo.rows
            .borrow_mut()
            .extend(rows.into_iter().map(|row| (row.id(), row)));
        repo
    }

    /// Make every subsequent write fail with a storage error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful write transactions so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn get(&self, id: T::Id) -> Option<T> {
        self.rows.borrow().get(&id).cloned()
    }

    fn begin_write(&self) -> DomainResult<()> {
        if self.fail_writes.get() {
            return Err(DomainError::storage("write rejected"));
        }
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[async_trait(?Send)]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn list(&self) -> DomainResult<Vec<T>> {
        Ok(self.rows.borrow().values().cloned().collect())
    }

    async fn upsert(&self, entity: &T) -> DomainResult<()> {
        self.begin_write()?;
        self.rows.borrow_mut().insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn clear(&self) -> DomainResult<()> {
        self.begin_write()?;
        self.rows.borrow_mut().clear();
        Ok(())
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.rows.borrow().len())
    }

    async fn replace_all(&self, entities: &[T]) -> DomainResult<()> {
        self.begin_write()?;
        let mut rows = self.rows.borrow_mut();
        rows.clear();
        rows.extend(entities.iter().map(|e| (e.id(), e.clone())));
        Ok(())
    }
}
