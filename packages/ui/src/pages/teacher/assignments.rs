use dioxus::prelude::*;
use school_core::{Assignment, AssignmentInput, Class, ListParams, SortDirection, format_number};

use crate::components::{
    ActionBar, Column, ConfirmDialog, DataTable, FormField, InputKind, Modal, SortState, use_toasts,
};
use crate::hooks::use_list_query;
use crate::pages::{format_date, parse_optional, run_mutation, use_form_status};

fn due_cell(assignment: &Assignment) -> Element {
    rsx! { "{format_date(assignment.due_date)}" }
}

fn max_cell(assignment: &Assignment) -> Element {
    rsx! { "{format_number(assignment.max_score)}" }
}

/// Assignments of one class, paged in the browser.
#[component]
pub(super) fn AssignmentsTab(class: Class) -> Element {
    let toasts = use_toasts();
    let class_id = class.id;
    let query = use_list_query(
        ListParams::new().with_limit(500).sorted_by("due_date", SortDirection::Asc),
        move |params| api::get_assignments(class_id, params),
    );
    let mut editing = use_signal(|| None::<Option<Assignment>>);
    let mut deleting = use_signal(|| None::<Assignment>);

    let columns = vec![
        Column::new("title", "Title").sortable(),
        Column::new("due_date", "Due").sortable().render(due_cell),
        Column::new("max_score", "Max score").sortable().render(max_cell),
        Column::new("description", "Description"),
    ];

    let confirm_delete = move |_| {
        let Some(assignment) = deleting.take() else {
            return;
        };
        run_mutation(
            toasts,
            api::delete_assignment(assignment.id),
            format!("{} deleted", assignment.title),
            None,
            move |_| query.refresh(),
        );
    };

    rsx! {
        div { class: "assignments",
            ActionBar {
                title: "Assignments",
                primary_label: "Add Assignment",
                on_primary: move |_| editing.set(Some(None)),
            }
            DataTable::<Assignment> {
                columns,
                data: query.items(),
                loading: query.loading(),
                error: query.error(),
                on_retry: move |_| query.refresh(),
                rows_per_page: 5,
                initial_sort: SortState::by("due_date", SortDirection::Asc),
                empty_message: "No assignments set for this class",
                row_actions: move |assignment: Assignment| {
                    let edit = assignment.clone();
                    rsx! {
                        div { class: "row-actions",
                            button { class: "btn btn-small", onclick: move |_| editing.set(Some(Some(edit.clone()))), "Edit" }
                            button { class: "btn btn-small btn-danger", onclick: move |_| deleting.set(Some(assignment.clone())), "Delete" }
                        }
                    }
                },
            }
            if let Some(assignment) = editing() {
                AssignmentForm {
                    class: class.clone(),
                    assignment,
                    on_close: move |_| editing.set(None),
                    on_saved: move |_| {
                        editing.set(None);
                        query.refresh();
                    },
                }
            }
            ConfirmDialog {
                open: deleting.read().is_some(),
                title: "Delete assignment",
                message: match &*deleting.read() {
                    Some(assignment) => format!("Delete {} and every grade entered for it?", assignment.title),
                    None => String::new(),
                },
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn AssignmentForm(
    class: Class,
    assignment: Option<Assignment>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let toasts = use_toasts();
    let form = use_form_status();
    let id = assignment.as_ref().map(|a| a.id);
    let class_id = class.id;
    let mut input = use_signal(|| AssignmentInput {
        class_id: Some(class_id),
        title: assignment.as_ref().map(|a| a.title.clone()).unwrap_or_default(),
        description: assignment.as_ref().map(|a| a.description.clone()).unwrap_or_default(),
        due_date: assignment.as_ref().map(|a| a.due_date),
        max_score: assignment.as_ref().map(|a| a.max_score),
    });
    let mut max_text = use_signal(|| {
        assignment
            .as_ref()
            .map(|a| format_number(a.max_score))
            .unwrap_or_else(|| "100".to_string())
    });

    let save = move |_| {
        let mut payload = input();
        payload.max_score = parse_optional(&max_text.read());
        let request = async move {
            match id {
                Some(id) => api::update_assignment(id, payload).await,
                None => api::create_assignment(payload).await,
            }
        };
        let message = if id.is_some() { "Assignment updated" } else { "Assignment created" };
        run_mutation(toasts, request, message, Some(form), move |_| on_saved.call(()));
    };

    let title = if id.is_some() {
        format!("Edit assignment for {}", class.name)
    } else {
        format!("New assignment for {}", class.name)
    };
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
                label: "Title",
                required: true,
                value: current.title.clone(),
                error: form.error_for("title"),
                on_change: move |v: String| input.write().title = v,
            }
            FormField {
                label: "Description",
                kind: InputKind::Textarea,
                value: current.description.clone(),
                on_change: move |v: String| input.write().description = v,
            }
            div { class: "form-row",
                FormField {
                    label: "Due date",
                    kind: InputKind::Date,
                    required: true,
                    value: current.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
                    error: form.error_for("due"),
                    on_change: move |v: String| input.write().due_date = parse_optional(&v),
                }
                FormField {
                    label: "Max score",
                    kind: InputKind::Number,
                    required: true,
                    min: "1",
                    step: "0.5",
                    value: max_text(),
                    error: form.error_for("score"),
                    on_change: move |v: String| max_text.set(v),
                }
            }
        }
    }
}
