//! Core domain types for the school administration platform.
//!
//! This crate contains shared types used across all packages:
//! - Records (schools, branches, users, plans, tickets, academic data)
//! - The list-query pipeline (filter, search, sort, paginate)
//! - Response envelopes and the gradebook CSV export

mod academic;
mod envelope;
mod ids;
mod inputs;
mod record;
mod role;
mod school;
mod support;
mod user;

pub mod gradebook;
pub mod list_query;

pub use academic::{Assignment, AttendanceRecord, AttendanceStatus, Class, Grade, Student, Term};
pub use envelope::{ApiError, ApiResult, PageMeta, Paginated};
pub use gradebook::{AttendanceSummary, Gradebook};
pub use ids::{
    AssignmentId, AttendanceId, AuditLogId, BranchId, ClassId, GradeId, PlanId, SchoolId, StudentId,
    TermId, TicketId, UserId,
};
pub use inputs::{
    AssignmentInput, AttendanceEntry, AttendanceInput, BranchInput, GradeInput, PlanInput,
    PlatformStats, SchoolInput, SchoolOverview, TermInput, TicketInput, UserInput,
};
pub use list_query::{ListParams, SortDirection};
pub use record::{Entity, FieldValue, Record, compare_fields, format_number};
pub use role::Role;
pub use school::{BillingCycle, Branch, BranchStatus, Plan, PlanLimits, School, SchoolStatus};
pub use support::{SupportTicket, TicketCategory, TicketPriority, TicketStatus};
pub use user::{AuditLog, User, UserStatus};
