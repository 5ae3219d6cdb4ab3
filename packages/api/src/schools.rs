//! School and branch server functions.

use dioxus::prelude::*;
use school_core::{
    ApiResult, Branch, BranchId, BranchInput, ListParams, Paginated, School, SchoolId, SchoolInput,
    SchoolStatus,
};

/// List schools with search, filters, sorting and pagination.
#[post("/api/schools/list")]
pub async fn get_schools(params: ListParams) -> Result<ApiResult<Paginated<School>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_schools(params).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/schools/get")]
pub async fn get_school(id: SchoolId) -> Result<ApiResult<School>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_school(id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/schools/create")]
pub async fn create_school(input: SchoolInput) -> Result<ApiResult<School>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.create_school(input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/schools/update")]
pub async fn update_school(id: SchoolId, input: SchoolInput) -> Result<ApiResult<School>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.update_school(id, input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Delete a school and its branches.
#[post("/api/schools/delete")]
pub async fn delete_school(id: SchoolId) -> Result<ApiResult<()>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.delete_school(id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/schools/status")]
pub async fn set_school_status(id: SchoolId, status: SchoolStatus) -> Result<ApiResult<School>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.set_school_status(id, status).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// List branches, optionally for one school.
#[post("/api/branches/list")]
pub async fn get_branches(params: ListParams, school_id: Option<SchoolId>) -> Result<ApiResult<Paginated<Branch>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_branches(params, school_id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/branches/create")]
pub async fn create_branch(input: BranchInput) -> Result<ApiResult<Branch>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.create_branch(input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/branches/update")]
pub async fn update_branch(id: BranchId, input: BranchInput) -> Result<ApiResult<Branch>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.update_branch(id, input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/branches/delete")]
pub async fn delete_branch(id: BranchId) -> Result<ApiResult<()>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.delete_branch(id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}
