//! Storage for the school administration platform.
//!
//! Records live behind the [`Repository`] interface so the admin API never
//! depends on a concrete datastore. Two implementations are provided:
//!
//! - [`MemoryRepository`]: plain process-memory tables, used by tests and demos
//! - [`SurrealRepository`]: SurrealDB, in-memory by default
//!
//! # Features
//!
//! - `memory` (default): Use in-memory storage for testing
//! - `rocksdb`: Use RocksDB for persistent file-based storage

mod connection;
mod schema;
pub mod repositories;

pub use connection::{Database, DbConfig, DbError, get_db, init_db};
pub use repositories::{MemoryRepository, Repository, SurrealRepository};
pub use schema::{clear_tables, init_schema};

/// Initialize the database with the given configuration.
///
/// This should be called once at application startup.
pub async fn init(config: DbConfig) -> Result<(), DbError> {
    init_db(config).await?;
    init_schema().await?;
    Ok(())
}
