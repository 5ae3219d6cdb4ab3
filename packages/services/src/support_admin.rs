//! Support admin operations: tickets and school overviews.

use chrono::Utc;
use db::Repository;
use school_core::{
    ApiResult, Branch, ListParams, Paginated, Plan, School, SchoolId, SchoolOverview, SupportTicket,
    TicketId, TicketInput, TicketStatus,
};

use crate::admin::AdminApi;
use crate::error::{ServiceError, require};

impl<R: Repository> AdminApi<R> {
    /// Tickets, optionally limited to one school.
    pub async fn get_tickets(
        &self,
        params: ListParams,
        school_id: Option<SchoolId>,
    ) -> ApiResult<Paginated<SupportTicket>> {
        self.call("get_tickets", async {
            Ok(self
                .list_records::<SupportTicket, _>(&params, |t| {
                    school_id.is_none_or(|id| t.school_id == id)
                })
                .await)
        })
        .await
    }

    pub async fn get_ticket(&self, id: TicketId) -> ApiResult<SupportTicket> {
        self.call("get_ticket", self.fetch::<SupportTicket>(id, "Ticket")).await
    }

    pub async fn create_ticket(&self, input: TicketInput) -> ApiResult<SupportTicket> {
        self.call("create_ticket", async {
            let school_id = input
                .school_id
                .ok_or_else(|| ServiceError::validation("School is required"))?;
            require(&input.subject, "Subject is required")?;
            self.fetch::<School>(school_id, "School").await?;

            let ticket = SupportTicket::new(school_id, input.subject.trim(), input.description.trim())
                .with_priority(input.priority.unwrap_or_default())
                .with_category(input.category.unwrap_or_default());

            let ticket = self.repo.insert(&ticket).await?;
            self.audit(
                "ticket.create",
                "support_ticket",
                ticket.id,
                format!("Opened ticket: {}", ticket.subject),
            )
            .await;
            Ok(ticket)
        })
        .await
    }

    pub async fn update_ticket_status(
        &self,
        id: TicketId,
        status: TicketStatus,
    ) -> ApiResult<SupportTicket> {
        self.call("update_ticket_status", async {
            let mut ticket = self.fetch::<SupportTicket>(id, "Ticket").await?;
            let previous = ticket.status;
            ticket.status = status;
            ticket.updated_at = Utc::now();

            let ticket = self.repo.update(&ticket).await?;
            self.audit(
                "ticket.status",
                "support_ticket",
                ticket.id,
                format!("Status changed from {} to {}", previous.as_str(), status.as_str()),
            )
            .await;
            Ok(ticket)
        })
        .await
    }

    /// A school with its branches, plan and unresolved tickets.
    pub async fn get_school_overview(&self, school_id: SchoolId) -> ApiResult<SchoolOverview> {
        self.call("get_school_overview", async {
            let school = self.fetch::<School>(school_id, "School").await?;
            let branches = self.repo.find::<Branch, _>(|b| b.school_id == school_id).await?;
            let plan = match school.plan_id {
                Some(plan_id) => self.repo.get::<Plan>(&plan_id.to_string()).await?,
                None => None,
            };
            let open_tickets = self
                .repo
                .find::<SupportTicket, _>(|t| t.school_id == school_id && t.status.is_open())
                .await?;

            Ok(SchoolOverview {
                school,
                branches,
                plan,
                open_tickets,
            })
        })
        .await
    }
}
