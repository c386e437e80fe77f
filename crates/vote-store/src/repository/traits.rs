//! Repository Layer - Core Traits
//!
//! Abstract interface over the local key-value table.
//! Implementations: IndexedDB in the browser, in-memory for tests.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult};

/// Keyed storage for one entity type
///
/// Each call is atomic at the granularity of a single storage transaction.
/// Nothing spans calls; there is exactly one writer.
#[async_trait(?Send)]
pub trait Repository<T: Entity> {
    /// Every stored entity, in no particular order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Insert or overwrite by id
    async fn upsert(&self, entity: &T) -> DomainResult<()>;

    /// Delete every entity
    async fn clear(&self) -> DomainResult<()>;

    /// Number of stored entities
    async fn count(&self) -> DomainResult<usize>;

    /// Clear and write `entities` in one transaction
    async fn replace_all(&self, entities: &[T]) -> DomainResult<()>;
}
