//! Shared UI for the school administration console.

// Dioxus `rsx!` macro expands to unwraps internally; allow to avoid false positives.
#![allow(clippy::disallowed_methods)]

pub mod components;
pub mod hooks;
pub mod pages;

pub use components::{ToastViewport, use_toast_provider};
pub use pages::{
    AuditLogsPage, BranchesPage, DashboardPage, PlansPage, SchoolsPage, TeacherPage, TermsPage, TicketsPage,
    UsersPage,
};
