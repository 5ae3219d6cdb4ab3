//! Server initialization for the admin API.

use std::sync::LazyLock;

use db::{DbConfig, DbError, SurrealRepository};
use dioxus::prelude::ServerFnError;
use services::{AdminApi, ServiceConfig, seed_demo_data};
use tokio::sync::OnceCell;

/// Environment variable naming the SurrealDB endpoint (`mem://`, `rocksdb://path`, ...).
pub const DB_ENV: &str = "SCHOOL_ADMIN_DB";
/// Environment variable overriding the SurrealDB namespace.
pub const NAMESPACE_ENV: &str = "SCHOOL_ADMIN_NAMESPACE";

static ADMIN_API: LazyLock<OnceCell<AdminApi<SurrealRepository>>> = LazyLock::new(OnceCell::new);

/// Database settings from the environment, in-memory by default.
pub fn db_config_from_env() -> DbConfig {
    let mut config = DbConfig::from_endpoint(&std::env::var(DB_ENV).unwrap_or_default());
    if let Ok(namespace) = std::env::var(NAMESPACE_ENV)
        && !namespace.trim().is_empty()
    {
        config = config.with_namespace(namespace.trim());
    }
    config
}

/// Connect to the database, load demo data and build the admin API.
pub async fn init_admin_api() -> Result<AdminApi<SurrealRepository>, DbError> {
    tracing::info!("Initializing school admin API...");

    db::init(db_config_from_env()).await?;

    let repo = SurrealRepository::new();
    let mut config = ServiceConfig::from_env();

    if config.seed_demo_data {
        let summary = seed_demo_data(&repo).await?;
        if let Some(actor) = summary.super_admin {
            config = config.with_actor(actor);
        }
    }

    tracing::info!(latency_ms = config.latency.as_millis() as u64, "School admin API initialized");
    Ok(AdminApi::new(repo, config))
}

/// The shared admin API, initialized on first use.
pub async fn ensure_initialized() -> Result<&'static AdminApi<SurrealRepository>, ServerFnError> {
    ADMIN_API
        .get_or_try_init(init_admin_api)
        .await
        .map_err(|e| ServerFnError::new(format!("Initialization failed: {}", e)))
}
