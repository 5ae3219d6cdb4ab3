use dioxus::prelude::*;
use school_core::{
    ListParams, SchoolId, SortDirection, SupportTicket, TicketCategory, TicketInput, TicketPriority, TicketStatus,
};

use crate::components::{
    ActionBar, Column, DataTable, FilterSelect, FormField, InputKind, Modal, Pager, SearchInput, StatusBadge,
    use_toasts,
};
use crate::hooks::{settle, use_list_query};

use super::{SchoolName, enum_options, format_time, run_mutation, use_form_status, use_school_names};

fn category_options() -> Vec<(String, String)> {
    TicketCategory::ALL
        .iter()
        .map(|c| (c.as_str().to_string(), c.label().to_string()))
        .collect()
}

fn school_cell(ticket: &SupportTicket) -> Element {
    rsx! { SchoolName { id: ticket.school_id.to_string() } }
}

fn status_cell(ticket: &SupportTicket) -> Element {
    rsx! { StatusBadge { status: ticket.status.as_str().to_string() } }
}

fn priority_cell(ticket: &SupportTicket) -> Element {
    rsx! { StatusBadge { status: ticket.priority.as_str().to_string() } }
}

fn category_cell(ticket: &SupportTicket) -> Element {
    rsx! { "{ticket.category.label()}" }
}

fn updated_cell(ticket: &SupportTicket) -> Element {
    rsx! { "{format_time(ticket.updated_at)}" }
}

/// Support queue; a row opens the ticket with its school's overview.
#[component]
pub fn TicketsPage() -> Element {
    let schools = use_school_names();
    let query = use_list_query(
        ListParams::new().sorted_by("priority_rank", SortDirection::Desc),
        |params| api::get_tickets(params, None),
    );
    let mut creating = use_signal(|| false);
    let mut selected = use_signal(|| None::<SupportTicket>);

    let params = query.params();
    let columns = vec![
        Column::new("subject", "Subject").sortable(),
        Column::new("school_id", "School").render(school_cell),
        Column::new("priority_rank", "Priority").sortable().render(priority_cell),
        Column::new("category", "Category").sortable().render(category_cell),
        Column::new("status", "Status").sortable().render(status_cell),
        Column::new("updated_at", "Updated").sortable().render(updated_cell),
    ];

    rsx! {
        div { class: "page",
            ActionBar {
                title: "Support Tickets",
                subtitle: "Requests raised by schools",
                primary_label: "New Ticket",
                on_primary: move |_| creating.set(true),
            }
            div { class: "toolbar",
                SearchInput {
                    value: params.search.clone().unwrap_or_default(),
                    placeholder: "Search tickets...",
                    on_search: move |term| query.set_search(term),
                }
                FilterSelect {
                    label: "Status",
                    value: params.filter("status").unwrap_or_default().to_string(),
                    options: enum_options(&TicketStatus::ALL, TicketStatus::as_str),
                    on_change: move |value| query.set_filter("status", value),
                }
                FilterSelect {
                    label: "Priority",
                    value: params.filter("priority").unwrap_or_default().to_string(),
                    options: enum_options(&TicketPriority::ALL, TicketPriority::as_str),
                    on_change: move |value| query.set_filter("priority", value),
                }
                FilterSelect {
                    label: "Category",
                    value: params.filter("category").unwrap_or_default().to_string(),
                    options: category_options(),
                    on_change: move |value| query.set_filter("category", value),
                }
                FilterSelect {
                    label: "School",
                    value: params.filter("school_id").unwrap_or_default().to_string(),
                    options: schools(),
                    on_change: move |value| query.set_filter("school_id", value),
                }
            }
            DataTable::<SupportTicket> {
                columns,
                data: query.items(),
                loading: query.loading(),
                error: query.error(),
                on_retry: move |_| query.refresh(),
                pagination: false,
                on_sort: move |sort| query.set_sort(sort),
                on_row_click: move |ticket| selected.set(Some(ticket)),
                empty_message: "No tickets match the current filters",
            }
            if let Some(meta) = query.meta() {
                Pager { meta, on_page: move |page| query.set_page(page) }
            }
            if creating() {
                TicketForm {
                    school_options: schools(),
                    on_close: move |_| creating.set(false),
                    on_saved: move |_| {
                        creating.set(false);
                        query.refresh();
                    },
                }
            }
            if let Some(ticket) = selected() {
                TicketDetail {
                    ticket,
                    on_close: move |_| selected.set(None),
                    on_changed: move |updated| {
                        selected.set(Some(updated));
                        query.refresh();
                    },
                }
            }
        }
    }
}

#[component]
fn TicketDetail(
    ticket: SupportTicket,
    on_close: EventHandler<()>,
    on_changed: EventHandler<SupportTicket>,
) -> Element {
    let toasts = use_toasts();
    let school_id = ticket.school_id;
    let overview = use_resource(move || async move { settle(api::get_school_overview(school_id).await) });

    let id = ticket.id;
    let set_status = move |value: String| {
        let Some(status) = TicketStatus::parse(&value) else {
            return;
        };
        run_mutation(
            toasts,
            api::update_ticket_status(id, status),
            format!("Ticket marked {}", status.as_str().replace('-', " ")),
            None,
            move |updated| on_changed.call(updated),
        );
    };

    rsx! {
        Modal {
            open: true,
            title: ticket.subject.clone(),
            class: "modal-wide",
            on_close: move |_| on_close.call(()),
            div { class: "ticket-meta",
                StatusBadge { status: ticket.priority.as_str().to_string() }
                span { class: "ticket-category", "{ticket.category.label()}" }
                span { class: "muted", "Opened {format_time(ticket.created_at)}" }
            }
            p { class: "ticket-description", "{ticket.description}" }
            FormField {
                label: "Status",
                kind: InputKind::Select,
                required: true,
                value: ticket.status.as_str().to_string(),
                options: enum_options(&TicketStatus::ALL, TicketStatus::as_str),
                on_change: set_status,
            }
            section { class: "school-overview",
                h3 { "School" }
                {match &*overview.read() {
                    None => rsx! { p { class: "muted", "Loading school..." } },
                    Some(Err(err)) => rsx! { p { class: "form-error", "{err.error}" } },
                    Some(Ok(view)) => rsx! {
                        dl { class: "detail-list",
                            dt { "Name" }
                            dd { "{view.school.name}" }
                            dt { "Status" }
                            dd { StatusBadge { status: view.school.status.as_str().to_string() } }
                            dt { "Contact" }
                            dd { "{view.school.contact_email} {view.school.contact_phone}" }
                            dt { "Plan" }
                            dd {
                                {view.plan.as_ref().map(|p| p.name.clone()).unwrap_or_else(|| "No plan".to_string())}
                            }
                            dt { "Branches" }
                            dd {
                                for branch in view.branches.iter() {
                                    span { key: "{branch.id}", class: "chip", "{branch.name}" }
                                }
                            }
                            dt { "Open tickets" }
                            dd { "{view.open_tickets.len()}" }
                        }
                    },
                }}
            }
        }
    }
}

#[component]
fn TicketForm(
    school_options: Vec<(String, String)>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let toasts = use_toasts();
    let form = use_form_status();
    let mut input = use_signal(TicketInput::default);

    let save = move |_| {
        let payload = input();
        run_mutation(
            toasts,
            api::create_ticket(payload),
            "Ticket created",
            Some(form),
            move |_| on_saved.call(()),
        );
    };

    let current = input.read().clone();

    rsx! {
        Modal {
            open: true,
            title: "New Ticket",
            on_close: move |_| on_close.call(()),
            footer: rsx! {
                button { class: "btn btn-secondary", onclick: move |_| on_close.call(()), "Cancel" }
                button { class: "btn btn-primary", disabled: form.busy(), onclick: save, "Create" }
            },
            FormField {
                label: "School",
                kind: InputKind::Select,
                required: true,
                value: current.school_id.map(|s| s.to_string()).unwrap_or_default(),
                options: school_options,
                error: form.error_for("school"),
                on_change: move |v: String| input.write().school_id = SchoolId::parse(&v).ok(),
            }
            FormField {
                label: "Subject",
                required: true,
                value: current.subject.clone(),
                error: form.error_for("subject"),
                on_change: move |v: String| input.write().subject = v,
            }
            FormField {
                label: "Description",
                kind: InputKind::Textarea,
                rows: 5,
                value: current.description.clone(),
                on_change: move |v: String| input.write().description = v,
            }
            div { class: "form-row",
                FormField {
                    label: "Priority",
                    kind: InputKind::Select,
                    required: true,
                    value: current.priority.unwrap_or_default().as_str().to_string(),
                    options: enum_options(&TicketPriority::ALL, TicketPriority::as_str),
                    on_change: move |v: String| input.write().priority = TicketPriority::parse(&v),
                }
                FormField {
                    label: "Category",
                    kind: InputKind::Select,
                    required: true,
                    value: current.category.unwrap_or_default().as_str().to_string(),
                    options: category_options(),
                    on_change: move |v: String| input.write().category = TicketCategory::parse(&v),
                }
            }
        }
    }
}
