//! Process-memory tables.

use std::collections::HashMap;
use std::sync::RwLock;

use school_core::Entity;
use serde_json::Value;

use super::Repository;
use crate::DbError;

#[derive(Debug, Clone)]
struct StoredRow {
    key: String,
    data: Value,
}

/// Repository backed by ordered in-memory vectors, one per table.
///
/// Nothing survives the process. Mutations take effect immediately and the
/// last write wins.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    tables: RwLock<HashMap<&'static str, Vec<StoredRow>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryRepository {
    async fn insert<T: Entity>(&self, record: &T) -> Result<T, DbError> {
        let key = record.key();
        let data = serde_json::to_value(record)?;

        let mut tables = self.tables.write().map_err(|_| DbError::Poisoned)?;
        let rows = tables.entry(T::TABLE).or_default();
        if rows.iter().any(|row| row.key == key) {
            return Err(DbError::Conflict(format!("{}:{}", T::TABLE, key)));
        }
        rows.push(StoredRow { key, data });

        Ok(record.clone())
    }

    async fn get<T: Entity>(&self, key: &str) -> Result<Option<T>, DbError> {
        let tables = self.tables.read().map_err(|_| DbError::Poisoned)?;

        let Some(row) = tables
            .get(T::TABLE)
            .and_then(|rows| rows.iter().find(|row| row.key == key))
        else {
            return Ok(None);
        };

        Ok(Some(serde_json::from_value(row.data.clone())?))
    }

    async fn list<T: Entity>(&self) -> Result<Vec<T>, DbError> {
        let tables = self.tables.read().map_err(|_| DbError::Poisoned)?;

        tables
            .get(T::TABLE)
            .map(|rows| {
                rows.iter()
                    .map(|row| serde_json::from_value(row.data.clone()).map_err(DbError::from))
                    .collect()
            })
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn update<T: Entity>(&self, record: &T) -> Result<T, DbError> {
        let key = record.key();
        let data = serde_json::to_value(record)?;

        let mut tables = self.tables.write().map_err(|_| DbError::Poisoned)?;
        let row = tables
            .get_mut(T::TABLE)
            .and_then(|rows| rows.iter_mut().find(|row| row.key == key))
            .ok_or_else(|| DbError::NotFound(format!("{}:{}", T::TABLE, key)))?;
        row.data = data;

        Ok(record.clone())
    }

    async fn delete<T: Entity>(&self, key: &str) -> Result<bool, DbError> {
        let mut tables = self.tables.write().map_err(|_| DbError::Poisoned)?;

        let Some(rows) = tables.get_mut(T::TABLE) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|row| row.key != key);

        Ok(rows.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_core::{School, SchoolStatus};

    #[tokio::test]
    async fn keeps_insertion_order_and_replaces_in_place() {
        let repo = MemoryRepository::new();
        let first = School::new("First", "Oslo");
        let second = School::new("Second", "Bergen");
        repo.insert(&first).await.unwrap();
        repo.insert(&second).await.unwrap();

        let mut changed = first.clone();
        changed.status = SchoolStatus::Active;
        repo.update(&changed).await.unwrap();

        let all: Vec<School> = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].status, SchoolStatus::Active);
        assert_eq!(all[1].id, second.id);
    }

    #[tokio::test]
    async fn rejects_duplicate_keys_and_missing_updates() {
        let repo = MemoryRepository::new();
        let school = School::new("Only", "Lima");
        repo.insert(&school).await.unwrap();

        assert!(matches!(repo.insert(&school).await, Err(DbError::Conflict(_))));
        assert!(matches!(
            repo.update(&School::new("Ghost", "Nowhere")).await,
            Err(DbError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let repo = MemoryRepository::new();
        let school = School::new("Temp", "Quito");
        repo.insert(&school).await.unwrap();

        assert!(repo.delete::<School>(&school.key()).await.unwrap());
        assert!(!repo.delete::<School>(&school.key()).await.unwrap());
        assert_eq!(repo.count::<School>().await.unwrap(), 0);
    }
}
