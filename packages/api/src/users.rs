//! User and audit log server functions.

use dioxus::prelude::*;
use school_core::{ApiResult, AuditLog, ListParams, Paginated, User, UserId, UserInput};

#[post("/api/users/list")]
pub async fn get_users(params: ListParams) -> Result<ApiResult<Paginated<User>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_users(params).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/users/get")]
pub async fn get_user(id: UserId) -> Result<ApiResult<User>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_user(id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Create a user. Fails with 409 when the email is taken.
#[post("/api/users/create")]
pub async fn create_user(input: UserInput) -> Result<ApiResult<User>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.create_user(input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/users/update")]
pub async fn update_user(id: UserId, input: UserInput) -> Result<ApiResult<User>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.update_user(id, input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/users/delete")]
pub async fn delete_user(id: UserId) -> Result<ApiResult<()>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.delete_user(id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Audit entries, newest first by default.
#[post("/api/audit-logs/list")]
pub async fn get_audit_logs(params: ListParams) -> Result<ApiResult<Paginated<AuditLog>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_audit_logs(params).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}
