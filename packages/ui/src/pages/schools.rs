use dioxus::prelude::*;
use school_core::{ListParams, PlanId, School, SchoolInput, SchoolStatus, SortDirection};

use crate::components::{
    ActionBar, Column, ConfirmDialog, DataTable, FilterSelect, FormField, InputKind, Modal, Pager, SearchInput,
    StatusBadge, use_toasts,
};
use crate::hooks::{all_rows, settle, use_list_query};

use super::{enum_options, format_time, parse_optional, run_mutation, use_form_status};

fn status_cell(school: &School) -> Element {
    rsx! { StatusBadge { status: school.status.as_str().to_string() } }
}

fn created_cell(school: &School) -> Element {
    rsx! { "{format_time(school.created_at)}" }
}

/// School directory with create, edit, suspend and delete.
#[component]
pub fn SchoolsPage() -> Element {
    let toasts = use_toasts();
    let query = use_list_query(
        ListParams::new().sorted_by("name", SortDirection::Asc),
        api::get_schools,
    );
    // `Some(None)` is the empty create form.
    let mut editing = use_signal(|| None::<Option<School>>);
    let mut deleting = use_signal(|| None::<School>);

    let plans = use_resource(|| async move { settle(api::get_plans(all_rows()).await) });
    let plan_options = use_memo(move || match &*plans.read() {
        Some(Ok(page)) => page
            .items
            .iter()
            .map(|p| (p.id.to_string(), p.name.clone()))
            .collect::<Vec<_>>(),
        _ => Vec::new(),
    });

    let params = query.params();
    let columns = vec![
        Column::new("name", "Name").sortable(),
        Column::new("location", "Location").sortable(),
        Column::new("branches", "Branches").sortable(),
        Column::new("students", "Students").sortable(),
        Column::new("status", "Status").sortable().render(status_cell),
        Column::new("created_at", "Created").sortable().render(created_cell),
    ];

    let set_status = move |school: School, status: SchoolStatus| {
        let label = if status == SchoolStatus::Suspended { "suspended" } else { "activated" };
        run_mutation(
            toasts,
            api::set_school_status(school.id, status),
            format!("{} {label}", school.name),
            None,
            move |_| query.refresh(),
        );
    };

    let confirm_delete = move |_| {
        let Some(school) = deleting.take() else {
            return;
        };
        run_mutation(
            toasts,
            api::delete_school(school.id),
            format!("{} deleted", school.name),
            None,
            move |_| query.refresh(),
        );
    };

    rsx! {
        div { class: "page",
            ActionBar {
                title: "Schools",
                subtitle: "Every school on the platform",
                primary_label: "Add School",
                on_primary: move |_| editing.set(Some(None)),
            }
            div { class: "toolbar",
                SearchInput {
                    value: params.search.clone().unwrap_or_default(),
                    placeholder: "Search by name or location...",
                    on_search: move |term| query.set_search(term),
                }
                FilterSelect {
                    label: "Status",
                    value: params.filter("status").unwrap_or_default().to_string(),
                    options: enum_options(&SchoolStatus::ALL, SchoolStatus::as_str),
                    on_change: move |value| query.set_filter("status", value),
                }
            }
            DataTable::<School> {
                columns,
                data: query.items(),
                loading: query.loading(),
                error: query.error(),
                on_retry: move |_| query.refresh(),
                pagination: false,
                on_sort: move |sort| query.set_sort(sort),
                empty_message: "No schools match the current filters",
                row_actions: move |school: School| {
                    let edit = school.clone();
                    let remove = school.clone();
                    let suspended = school.status == SchoolStatus::Suspended;
                    rsx! {
                        div { class: "row-actions",
                            button { class: "btn btn-small", onclick: move |_| editing.set(Some(Some(edit.clone()))), "Edit" }
                            button {
                                class: "btn btn-small",
                                onclick: move |_| {
                                    let next = if suspended { SchoolStatus::Active } else { SchoolStatus::Suspended };
                                    set_status(school.clone(), next);
                                },
                                if suspended { "Activate" } else { "Suspend" }
                            }
                            button { class: "btn btn-small btn-danger", onclick: move |_| deleting.set(Some(remove.clone())), "Delete" }
                        }
                    }
                },
            }
            if let Some(meta) = query.meta() {
                Pager { meta, on_page: move |page| query.set_page(page) }
            }
            if let Some(school) = editing() {
                SchoolForm {
                    school,
                    plan_options: plan_options(),
                    on_close: move |_| editing.set(None),
                    on_saved: move |_| {
                        editing.set(None);
                        query.refresh();
                    },
                }
            }
            ConfirmDialog {
                open: deleting.read().is_some(),
                title: "Delete school",
                message: match &*deleting.read() {
                    Some(school) => format!("Delete {} with all of its branches and terms?", school.name),
                    None => String::new(),
                },
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn SchoolForm(
    school: Option<School>,
    plan_options: Vec<(String, String)>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let toasts = use_toasts();
    let form = use_form_status();
    let id = school.as_ref().map(|s| s.id);
    let mut input = use_signal(|| school.as_ref().map(SchoolInput::from).unwrap_or_default());

    let save = move |_| {
        let payload = input();
        let request = async move {
            match id {
                Some(id) => api::update_school(id, payload).await,
                None => api::create_school(payload).await,
            }
        };
        let message = if id.is_some() { "School updated" } else { "School created" };
        run_mutation(toasts, request, message, Some(form), move |_| on_saved.call(()));
    };

    let title = if id.is_some() { "Edit School" } else { "Add School" }.to_string();
    let current = input.read().clone();
    let status = current.status.unwrap_or_default().as_str().to_string();
    let plan = current.plan_id.map(|p| p.to_string()).unwrap_or_default();
    let students = current.students.map(|n| n.to_string()).unwrap_or_default();

    rsx! {
        Modal {
            open: true,
            title,
            on_close: move |_| on_close.call(()),
            footer: rsx! {
                button { class: "btn btn-secondary", onclick: move |_| on_close.call(()), "Cancel" }
                button { class: "btn btn-primary", disabled: form.busy(), onclick: save, "Save" }
            },
            FormField {
                label: "School name",
                required: true,
                value: current.name.clone(),
                error: form.error_for("name"),
                on_change: move |v: String| input.write().name = v,
            }
            FormField {
                label: "Location",
                required: true,
                value: current.location.clone(),
                error: form.error_for("location"),
                on_change: move |v: String| input.write().location = v,
            }
            FormField {
                label: "Contact email",
                kind: InputKind::Email,
                value: current.contact_email.clone(),
                error: form.error_for("email"),
                on_change: move |v: String| input.write().contact_email = v,
            }
            FormField {
                label: "Contact phone",
                value: current.contact_phone.clone(),
                on_change: move |v: String| input.write().contact_phone = v,
            }
            FormField {
                label: "Students",
                kind: InputKind::Number,
                min: "0",
                value: students,
                on_change: move |v: String| input.write().students = parse_optional(&v),
            }
            FormField {
                label: "Status",
                kind: InputKind::Select,
                required: true,
                value: status.clone(),
                on_change: move |v: String| input.write().status = SchoolStatus::parse(&v),
                for (value, label) in enum_options(&SchoolStatus::ALL, SchoolStatus::as_str) {
                    option { key: "{value}", value: "{value}", selected: value == status, "{label}" }
                }
            }
            FormField {
                label: "Plan",
                kind: InputKind::Select,
                placeholder: "No plan",
                value: plan,
                options: plan_options,
                error: form.error_for("plan"),
                on_change: move |v: String| input.write().plan_id = PlanId::parse(&v).ok(),
            }
        }
    }
}
