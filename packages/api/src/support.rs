//! Support ticket server functions.

use dioxus::prelude::*;
use school_core::{
    ApiResult, ListParams, Paginated, SchoolId, SchoolOverview, SupportTicket, TicketId, TicketInput,
    TicketStatus,
};

#[post("/api/tickets/list")]
pub async fn get_tickets(params: ListParams, school_id: Option<SchoolId>) -> Result<ApiResult<Paginated<SupportTicket>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_tickets(params, school_id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/tickets/get")]
pub async fn get_ticket(id: TicketId) -> Result<ApiResult<SupportTicket>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_ticket(id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/tickets/create")]
pub async fn create_ticket(input: TicketInput) -> Result<ApiResult<SupportTicket>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.create_ticket(input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/tickets/status")]
pub async fn update_ticket_status(id: TicketId, status: TicketStatus) -> Result<ApiResult<SupportTicket>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.update_ticket_status(id, status).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// School details for support staff.
#[post("/api/schools/overview")]
pub async fn get_school_overview(school_id: SchoolId) -> Result<ApiResult<SchoolOverview>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_school_overview(school_id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}
