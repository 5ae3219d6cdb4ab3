#![allow(dead_code)]

use std::future::Future;

use db::{DbError, MemoryRepository, Repository};
use school_core::{Entity, School, SchoolInput, SchoolStatus};
use services::{AdminApi, ServiceConfig};

pub fn api() -> AdminApi<MemoryRepository> {
    AdminApi::new(MemoryRepository::new(), ServiceConfig::instant())
}

pub async fn seeded_api() -> Result<AdminApi<MemoryRepository>, DbError> {
    let repo = MemoryRepository::new();
    let summary = services::seed_demo_data(&repo).await?;
    let mut api = AdminApi::new(repo, ServiceConfig::instant());
    if let Some(actor) = summary.super_admin {
        api.set_actor(actor);
    }
    Ok(api)
}

pub fn school_input(name: &str, status: SchoolStatus) -> SchoolInput {
    SchoolInput {
        name: name.to_string(),
        location: "Testville".to_string(),
        status: Some(status),
        ..Default::default()
    }
}

pub async fn add_school(api: &AdminApi<MemoryRepository>, name: &str, status: SchoolStatus) -> School {
    match api.create_school(school_input(name, status)).await {
        Ok(school) => school,
        Err(err) => panic!("failed to create school {name}: {err}"),
    }
}

/// A store whose every call fails.
pub struct BrokenRepository;

impl Repository for BrokenRepository {
    fn insert<T: Entity>(&self, _record: &T) -> impl Future<Output = Result<T, DbError>> + Send {
        async { Err(DbError::Query("disk on fire".into())) }
    }

    fn get<T: Entity>(&self, _key: &str) -> impl Future<Output = Result<Option<T>, DbError>> + Send {
        async { Err(DbError::Query("disk on fire".into())) }
    }

    fn list<T: Entity>(&self) -> impl Future<Output = Result<Vec<T>, DbError>> + Send {
        async { Err(DbError::Query("disk on fire".into())) }
    }

    fn update<T: Entity>(&self, _record: &T) -> impl Future<Output = Result<T, DbError>> + Send {
        async { Err(DbError::Query("disk on fire".into())) }
    }

    fn delete<T: Entity>(&self, _key: &str) -> impl Future<Output = Result<bool, DbError>> + Send {
        async { Err(DbError::Query("disk on fire".into())) }
    }
}
