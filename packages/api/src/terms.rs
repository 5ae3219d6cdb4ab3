//! Academic term server functions.

use dioxus::prelude::*;
use school_core::{ApiResult, ListParams, Paginated, SchoolId, Term, TermId, TermInput};

#[post("/api/terms/list")]
pub async fn get_terms(params: ListParams, school_id: Option<SchoolId>) -> Result<ApiResult<Paginated<Term>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_terms(params, school_id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/terms/create")]
pub async fn create_term(input: TermInput) -> Result<ApiResult<Term>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.create_term(input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/terms/update")]
pub async fn update_term(id: TermId, input: TermInput) -> Result<ApiResult<Term>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.update_term(id, input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Make a term the current one for its school.
#[post("/api/terms/current")]
pub async fn set_current_term(id: TermId) -> Result<ApiResult<Term>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.set_current_term(id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/terms/delete")]
pub async fn delete_term(id: TermId) -> Result<ApiResult<()>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.delete_term(id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}
