//! SurrealDB-backed repository.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use school_core::Entity;
use serde::{Deserialize, Serialize};

use super::Repository;
use crate::{DbError, get_db};

/// Stored row: insertion sequence plus the serialized record.
#[derive(Debug, Serialize, Deserialize)]
struct Row<T> {
    seq: u64,
    data: T,
}

/// Repository over the global SurrealDB connection.
///
/// Call [`crate::init`] before using it.
#[derive(Debug, Default)]
pub struct SurrealRepository {
    last_seq: AtomicU64,
}

impl SurrealRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic sequence seeded from the clock so rows written by an
    /// earlier process (file or rocksdb endpoints) still sort first.
    fn next_seq(&self) -> u64 {
        let now = Utc::now().timestamp_micros().max(0) as u64;
        let prev = self
            .last_seq
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(last.saturating_add(1).max(now))
            })
            .unwrap_or_else(|prev| prev);
        prev.saturating_add(1).max(now)
    }
}

impl Repository for SurrealRepository {
    async fn insert<T: Entity>(&self, record: &T) -> Result<T, DbError> {
        let db = get_db()?;
        let key = record.key();

        let existing: Option<Row<T>> = db.select((T::TABLE, key.clone())).await?;
        if existing.is_some() {
            return Err(DbError::Conflict(format!("{}:{}", T::TABLE, key)));
        }

        let row = Row {
            seq: self.next_seq(),
            data: record.clone(),
        };
        let created: Option<Row<T>> = db.create((T::TABLE, key)).content(row).await?;

        created
            .map(|r| r.data)
            .ok_or_else(|| DbError::Query(format!("Failed to create {}", T::TABLE)))
    }

    async fn get<T: Entity>(&self, key: &str) -> Result<Option<T>, DbError> {
        let db = get_db()?;

        let record: Option<Row<T>> = db.select((T::TABLE, key.to_string())).await?;

        Ok(record.map(|r| r.data))
    }

    async fn list<T: Entity>(&self) -> Result<Vec<T>, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT * FROM type::table($table) ORDER BY seq ASC")
            .bind(("table", T::TABLE))
            .await?;

        let rows: Vec<Row<T>> = result.take(0)?;

        Ok(rows.into_iter().map(|r| r.data).collect())
    }

    async fn update<T: Entity>(&self, record: &T) -> Result<T, DbError> {
        let db = get_db()?;
        let key = record.key();

        let existing: Option<Row<T>> = db.select((T::TABLE, key.clone())).await?;
        let Some(existing) = existing else {
            return Err(DbError::NotFound(format!("{}:{}", T::TABLE, key)));
        };

        // Replace the whole row so cleared optional fields do not linger.
        let row = Row {
            seq: existing.seq,
            data: record.clone(),
        };
        let updated: Option<Row<T>> = db.update((T::TABLE, key.clone())).content(row).await?;

        updated
            .map(|r| r.data)
            .ok_or_else(|| DbError::NotFound(format!("{}:{}", T::TABLE, key)))
    }

    async fn delete<T: Entity>(&self, key: &str) -> Result<bool, DbError> {
        let db = get_db()?;

        let removed: Option<Row<T>> = db.delete((T::TABLE, key.to_string())).await?;

        Ok(removed.is_some())
    }
}
