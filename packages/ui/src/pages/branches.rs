use dioxus::prelude::*;
use school_core::{Branch, BranchInput, BranchStatus, ListParams, SchoolId, SortDirection};

use crate::components::{
    ActionBar, Column, ConfirmDialog, DataTable, FilterSelect, FormField, InputKind, Modal, Pager, SearchInput,
    StatusBadge, use_toasts,
};
use crate::hooks::use_list_query;

use super::{SchoolName, enum_options, parse_optional, run_mutation, use_form_status, use_school_names};

fn school_cell(branch: &Branch) -> Element {
    rsx! { SchoolName { id: branch.school_id.to_string() } }
}

fn status_cell(branch: &Branch) -> Element {
    rsx! { StatusBadge { status: branch.status.as_str().to_string() } }
}

#[component]
pub fn BranchesPage() -> Element {
    let toasts = use_toasts();
    let schools = use_school_names();
    let query = use_list_query(ListParams::new().sorted_by("name", SortDirection::Asc), |params| {
        api::get_branches(params, None)
    });
    let mut editing = use_signal(|| None::<Option<Branch>>);
    let mut deleting = use_signal(|| None::<Branch>);

    let params = query.params();
    let columns = vec![
        Column::new("name", "Branch").sortable(),
        Column::new("school_id", "School").render(school_cell),
        Column::new("location", "Location").sortable(),
        Column::new("students", "Students").sortable(),
        Column::new("status", "Status").sortable().render(status_cell),
    ];

    let confirm_delete = move |_| {
        let Some(branch) = deleting.take() else {
            return;
        };
        run_mutation(
            toasts,
            api::delete_branch(branch.id),
            format!("{} deleted", branch.name),
            None,
            move |_| query.refresh(),
        );
    };

    rsx! {
        div { class: "page",
            ActionBar {
                title: "Branches",
                subtitle: "Campuses of every school",
                primary_label: "Add Branch",
                on_primary: move |_| editing.set(Some(None)),
            }
            div { class: "toolbar",
                SearchInput {
                    value: params.search.clone().unwrap_or_default(),
                    placeholder: "Search branches...",
                    on_search: move |term| query.set_search(term),
                }
                FilterSelect {
                    label: "School",
                    value: params.filter("school_id").unwrap_or_default().to_string(),
                    options: schools(),
                    on_change: move |value| query.set_filter("school_id", value),
                }
                FilterSelect {
                    label: "Status",
                    value: params.filter("status").unwrap_or_default().to_string(),
                    options: enum_options(&BranchStatus::ALL, BranchStatus::as_str),
                    on_change: move |value| query.set_filter("status", value),
                }
            }
            DataTable::<Branch> {
                columns,
                data: query.items(),
                loading: query.loading(),
                error: query.error(),
                on_retry: move |_| query.refresh(),
                pagination: false,
                on_sort: move |sort| query.set_sort(sort),
                empty_message: "No branches found",
                row_actions: move |branch: Branch| {
                    let edit = branch.clone();
                    rsx! {
                        div { class: "row-actions",
                            button { class: "btn btn-small", onclick: move |_| editing.set(Some(Some(edit.clone()))), "Edit" }
                            button { class: "btn btn-small btn-danger", onclick: move |_| deleting.set(Some(branch.clone())), "Delete" }
                        }
                    }
                },
            }
            if let Some(meta) = query.meta() {
                Pager { meta, on_page: move |page| query.set_page(page) }
            }
            if let Some(branch) = editing() {
                BranchForm {
                    branch,
                    school_options: schools(),
                    on_close: move |_| editing.set(None),
                    on_saved: move |_| {
                        editing.set(None);
                        query.refresh();
                    },
                }
            }
            ConfirmDialog {
                open: deleting.read().is_some(),
                title: "Delete branch",
                message: match &*deleting.read() {
                    Some(branch) => format!("Delete {}? Its staff stay on the school without a branch.", branch.name),
                    None => String::new(),
                },
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn BranchForm(
    branch: Option<Branch>,
    school_options: Vec<(String, String)>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let toasts = use_toasts();
    let form = use_form_status();
    let id = branch.as_ref().map(|b| b.id);
    let mut input = use_signal(|| branch.as_ref().map(BranchInput::from).unwrap_or_default());

    let save = move |_| {
        let payload = input();
        let request = async move {
            match id {
                Some(id) => api::update_branch(id, payload).await,
                None => api::create_branch(payload).await,
            }
        };
        let message = if id.is_some() { "Branch updated" } else { "Branch created" };
        run_mutation(toasts, request, message, Some(form), move |_| on_saved.call(()));
    };

    let title = if id.is_some() { "Edit Branch" } else { "Add Branch" }.to_string();
    let current = input.read().clone();

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
                label: "School",
                kind: InputKind::Select,
                required: true,
                value: current.school_id.map(|s| s.to_string()).unwrap_or_default(),
                options: school_options,
                error: form.error_for("school"),
                on_change: move |v: String| input.write().school_id = SchoolId::parse(&v).ok(),
            }
            FormField {
                label: "Branch name",
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
                label: "Students",
                kind: InputKind::Number,
                min: "0",
                value: current.students.map(|n| n.to_string()).unwrap_or_default(),
                on_change: move |v: String| input.write().students = parse_optional(&v),
            }
            FormField {
                label: "Status",
                kind: InputKind::Radio,
                value: current.status.unwrap_or_default().as_str().to_string(),
                options: enum_options(&BranchStatus::ALL, BranchStatus::as_str),
                on_change: move |v: String| input.write().status = BranchStatus::parse(&v),
            }
        }
    }
}
