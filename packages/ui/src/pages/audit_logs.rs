use dioxus::prelude::*;
use school_core::{AuditLog, ListParams};

use crate::components::{ActionBar, Column, DataTable, FilterSelect, Modal, Pager, SearchInput, title_case};
use crate::hooks::use_list_query;

use super::format_time;

const RESOURCE_TYPES: [&str; 9] = [
    "school",
    "branch",
    "user",
    "plan",
    "ticket",
    "term",
    "assignment",
    "grade",
    "attendance",
];

fn time_cell(log: &AuditLog) -> Element {
    rsx! { "{format_time(log.timestamp)}" }
}

fn action_cell(log: &AuditLog) -> Element {
    rsx! { code { class: "audit-action", "{log.action}" } }
}

/// Read-only change history; rows open a detail dialog.
#[component]
pub fn AuditLogsPage() -> Element {
    let query = use_list_query(ListParams::new().with_limit(25), api::get_audit_logs);
    let mut selected = use_signal(|| None::<AuditLog>);

    let params = query.params();
    let columns = vec![
        Column::new("timestamp", "When").sortable().render(time_cell),
        Column::new("action", "Action").sortable().render(action_cell),
        Column::new("resource_type", "Resource").sortable(),
        Column::new("details", "Details"),
    ];
    let resource_options: Vec<(String, String)> = RESOURCE_TYPES
        .iter()
        .map(|t| (t.to_string(), title_case(t)))
        .collect();

    rsx! {
        div { class: "page",
            ActionBar {
                title: "Audit Logs",
                subtitle: "Every change made through the admin console",
                secondary_label: "Refresh",
                on_secondary: move |_| query.refresh(),
            }
            div { class: "toolbar",
                SearchInput {
                    value: params.search.clone().unwrap_or_default(),
                    placeholder: "Search actions and details...",
                    on_search: move |term| query.set_search(term),
                }
                FilterSelect {
                    label: "Resource",
                    value: params.filter("resource_type").unwrap_or_default().to_string(),
                    options: resource_options,
                    on_change: move |value| query.set_filter("resource_type", value),
                }
            }
            DataTable::<AuditLog> {
                columns,
                data: query.items(),
                loading: query.loading(),
                error: query.error(),
                on_retry: move |_| query.refresh(),
                pagination: false,
                on_sort: move |sort| query.set_sort(sort),
                on_row_click: move |log| selected.set(Some(log)),
                empty_message: "Nothing has been recorded yet",
            }
            if let Some(meta) = query.meta() {
                Pager { meta, on_page: move |page| query.set_page(page) }
            }
            if let Some(log) = selected() {
                Modal {
                    open: true,
                    title: log.action.clone(),
                    on_close: move |_| selected.set(None),
                    dl { class: "detail-list",
                        dt { "When" }
                        dd { "{format_time(log.timestamp)}" }
                        dt { "Resource" }
                        dd { "{log.resource_type} {log.resource_id}" }
                        dt { "Actor" }
                        dd { code { "{log.user_id}" } }
                        dt { "Details" }
                        dd { "{log.details}" }
                    }
                }
            }
        }
    }
}
