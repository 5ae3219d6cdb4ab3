//! Billing plan and dashboard server functions.

use dioxus::prelude::*;
use school_core::{ApiResult, ListParams, Paginated, Plan, PlanId, PlanInput, PlatformStats};

#[post("/api/plans/list")]
pub async fn get_plans(params: ListParams) -> Result<ApiResult<Paginated<Plan>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_plans(params).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/plans/get")]
pub async fn get_plan(id: PlanId) -> Result<ApiResult<Plan>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_plan(id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/plans/create")]
pub async fn create_plan(input: PlanInput) -> Result<ApiResult<Plan>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.create_plan(input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/plans/update")]
pub async fn update_plan(id: PlanId, input: PlanInput) -> Result<ApiResult<Plan>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.update_plan(id, input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Activate or deactivate a plan.
#[post("/api/plans/toggle")]
pub async fn toggle_plan(id: PlanId) -> Result<ApiResult<Plan>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.toggle_plan(id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/plans/delete")]
pub async fn delete_plan(id: PlanId) -> Result<ApiResult<()>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.delete_plan(id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Counters for the super admin dashboard.
#[post("/api/stats")]
pub async fn get_platform_stats() -> Result<ApiResult<PlatformStats>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_platform_stats().await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}
