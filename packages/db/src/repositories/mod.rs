//! Repository interface and its implementations.

mod memory;
mod surreal;

use std::future::Future;

use school_core::Entity;

use crate::DbError;

pub use memory::MemoryRepository;
pub use surreal::SurrealRepository;

/// Table-per-entity record storage.
///
/// Every method is generic over the record type; the table is chosen by
/// [`Entity::TABLE`] and rows are addressed by [`Entity::key`]. `list`
/// returns rows in insertion order.
pub trait Repository: Send + Sync {
    /// Insert a new record. Fails with [`DbError::Conflict`] if the key is taken.
    fn insert<T: Entity>(&self, record: &T) -> impl Future<Output = Result<T, DbError>> + Send;

    /// Fetch a record by key.
    fn get<T: Entity>(&self, key: &str) -> impl Future<Output = Result<Option<T>, DbError>> + Send;

    /// All records of a table, in insertion order.
    fn list<T: Entity>(&self) -> impl Future<Output = Result<Vec<T>, DbError>> + Send;

    /// Replace an existing record. Fails with [`DbError::NotFound`] if missing.
    fn update<T: Entity>(&self, record: &T) -> impl Future<Output = Result<T, DbError>> + Send;

    /// Delete a record by key; returns whether anything was removed.
    fn delete<T: Entity>(&self, key: &str) -> impl Future<Output = Result<bool, DbError>> + Send;

    /// Records matching a predicate, in insertion order.
    fn find<T, F>(&self, predicate: F) -> impl Future<Output = Result<Vec<T>, DbError>> + Send
    where
        T: Entity,
        F: Fn(&T) -> bool + Send,
    {
        async move {
            let mut records = self.list::<T>().await?;
            records.retain(|r| predicate(r));
            Ok(records)
        }
    }

    /// Number of records in a table.
    fn count<T: Entity>(&self) -> impl Future<Output = Result<usize, DbError>> + Send {
        async move { Ok(self.list::<T>().await?.len()) }
    }
}
