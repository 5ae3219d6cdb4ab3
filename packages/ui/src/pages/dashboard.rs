use dioxus::prelude::*;
use school_core::{ListParams, PlatformStats, SortDirection, SupportTicket};

use crate::components::{ActionBar, Column, DataTable, StatusBadge};
use crate::hooks::settle;

use super::format_time;

fn ticket_status(t: &SupportTicket) -> Element {
    rsx! { StatusBadge { status: t.status.as_str().to_string() } }
}

fn ticket_priority(t: &SupportTicket) -> Element {
    rsx! { StatusBadge { status: t.priority.as_str().to_string() } }
}

fn ticket_created(t: &SupportTicket) -> Element {
    rsx! { "{format_time(t.created_at)}" }
}

#[component]
fn StatCard(label: String, value: String, #[props(default)] note: Option<String>) -> Element {
    rsx! {
        div { class: "stat-card",
            div { class: "stat-value", "{value}" }
            div { class: "stat-label", "{label}" }
            if let Some(note) = note {
                div { class: "stat-note", "{note}" }
            }
        }
    }
}

/// Platform counters and the newest open tickets.
#[component]
pub fn DashboardPage() -> Element {
    let mut stats = use_resource(|| async move { settle(api::get_platform_stats().await) });
    let tickets = use_resource(|| async move {
        let params = ListParams::new()
            .with_filter("status", "open")
            .sorted_by("created_at", SortDirection::Desc)
            .with_limit(5);
        settle(api::get_tickets(params, None).await)
    });

    let recent = match &*tickets.read() {
        Some(Ok(page)) => page.items.clone(),
        _ => Vec::new(),
    };
    let columns = vec![
        Column::new("subject", "Subject"),
        Column::new("priority", "Priority").render(ticket_priority),
        Column::new("status", "Status").render(ticket_status),
        Column::new("created_at", "Opened").render(ticket_created),
    ];

    rsx! {
        div { class: "page",
            ActionBar {
                title: "Dashboard",
                subtitle: "Platform overview",
                secondary_label: "Refresh",
                on_secondary: move |_| stats.restart(),
            }
            {match &*stats.read() {
                None => rsx! { div { class: "stats-grid loading", "Loading statistics..." } },
                Some(Err(err)) => rsx! {
                    div { class: "alert alert-error", role: "alert", "{err.error}" }
                },
                Some(Ok(s)) => rsx! { StatsGrid { stats: s.clone() } },
            }}
            section { class: "card",
                h2 { "Recent open tickets" }
                DataTable::<SupportTicket> {
                    columns,
                    data: recent,
                    loading: !tickets.finished(),
                    pagination: false,
                    empty_message: "No open tickets",
                }
            }
        }
    }
}

#[component]
fn StatsGrid(stats: PlatformStats) -> Element {
    let schools_note = format!(
        "{} active · {} pending · {} suspended",
        stats.active_schools, stats.pending_schools, stats.suspended_schools
    );
    let revenue = format!("${:.2}", stats.monthly_revenue);

    rsx! {
        div { class: "stats-grid",
            StatCard { label: "Schools", value: stats.total_schools.to_string(), note: schools_note }
            StatCard { label: "Branches", value: stats.total_branches.to_string() }
            StatCard { label: "Users", value: stats.total_users.to_string() }
            StatCard { label: "Students", value: stats.total_students.to_string() }
            StatCard { label: "Active plans", value: stats.active_plans.to_string() }
            StatCard { label: "Open tickets", value: stats.open_tickets.to_string() }
            StatCard { label: "Monthly revenue", value: revenue }
        }
    }
}
