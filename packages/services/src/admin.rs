//! The admin API handle and the plumbing shared by every operation.

use std::fmt::Display;
use std::future::Future;

use db::Repository;
use school_core::list_query::run_list_query;
use school_core::{ApiResult, AuditLog, Entity, ListParams, Paginated};

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};

/// Admin API over a record store.
///
/// Operations are grouped by the role that uses them and live in the
/// `super_admin`, `support_admin`, `school_admin` and `teacher` modules.
/// Every operation waits for the configured latency first, then resolves to
/// an [`ApiResult`]: list operations always succeed (degrading to an empty
/// page), mutations fail with a structured [`school_core::ApiError`].
pub struct AdminApi<R> {
    pub(crate) repo: R,
    pub(crate) config: ServiceConfig,
}

impl<R: Repository> AdminApi<R> {
    pub fn new(repo: R, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Record audit entries under a different user from now on.
    pub fn set_actor(&mut self, actor: school_core::UserId) {
        self.config.actor = actor;
    }

    /// Run one operation: simulated latency, then the body, with errors
    /// converted into the response envelope.
    pub(crate) async fn call<T, F>(&self, op: &'static str, body: F) -> ApiResult<T>
    where
        F: Future<Output = ServiceResult<T>>,
    {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        tracing::debug!(op, "Admin API call");

        body.await.map_err(|err| {
            if err.status() >= 500 {
                tracing::error!(op, error = %err, "Admin API call failed");
            } else {
                tracing::debug!(op, error = %err, "Admin API call rejected");
            }
            err.into()
        })
    }

    /// Filter, search, sort and paginate the records matching `keep`.
    ///
    /// A failing store yields an empty page instead of an error.
    pub(crate) async fn list_records<T, F>(&self, params: &ListParams, keep: F) -> Paginated<T>
    where
        T: Entity,
        F: Fn(&T) -> bool + Send,
    {
        match self.repo.find::<T, F>(keep).await {
            Ok(records) => run_list_query(records, params, T::SEARCH_FIELDS),
            Err(err) => {
                tracing::warn!(table = T::TABLE, error = %err, "List degraded to an empty page");
                Paginated::empty(params.page_or_default(), params.limit_or_default())
            }
        }
    }

    /// Fetch a record or fail with 404 naming `what`.
    pub(crate) async fn fetch<T: Entity>(&self, key: impl Display, what: &str) -> ServiceResult<T> {
        let key = key.to_string();
        self.repo
            .get::<T>(&key)
            .await?
            .ok_or_else(|| ServiceError::not_found(what))
    }

    /// Append an audit entry. Failures are logged, never surfaced.
    pub(crate) async fn audit(
        &self,
        action: &str,
        resource_type: &str,
        resource_id: impl Display,
        details: impl Into<String>,
    ) {
        let entry = AuditLog::new(self.config.actor, action, resource_type, resource_id.to_string())
            .with_details(details);

        if let Err(err) = self.repo.insert(&entry).await {
            tracing::warn!(action, error = %err, "Failed to write audit log");
        }
    }
}
