use chrono::NaiveDate;
use dioxus::prelude::*;
use school_core::{ListParams, SchoolId, SortDirection, Term, TermInput};

use crate::components::{
    ActionBar, Column, ConfirmDialog, DataTable, FilterSelect, FormField, InputKind, Modal, Pager, StatusBadge,
    use_toasts,
};
use crate::hooks::use_list_query;

use super::{SchoolName, format_date, parse_optional, run_mutation, use_form_status, use_school_names};

fn school_cell(term: &Term) -> Element {
    rsx! { SchoolName { id: term.school_id.to_string() } }
}

fn start_cell(term: &Term) -> Element {
    rsx! { "{format_date(term.start_date)}" }
}

fn end_cell(term: &Term) -> Element {
    rsx! { "{format_date(term.end_date)}" }
}

fn length_cell(term: &Term) -> Element {
    let weeks = term.duration_days() / 7;
    rsx! { "{weeks} weeks" }
}

fn current_cell(term: &Term) -> Element {
    if term.is_current {
        rsx! { StatusBadge { status: "active".to_string() } }
    } else {
        rsx! {}
    }
}

/// Academic terms per school.
#[component]
pub fn TermsPage() -> Element {
    let toasts = use_toasts();
    let schools = use_school_names();
    let query = use_list_query(
        ListParams::new().sorted_by("start_date", SortDirection::Asc),
        |params| api::get_terms(params, None),
    );
    let mut editing = use_signal(|| None::<Option<Term>>);
    let mut deleting = use_signal(|| None::<Term>);

    let params = query.params();
    let columns = vec![
        Column::new("name", "Term").sortable(),
        Column::new("school_id", "School").render(school_cell),
        Column::new("start_date", "Starts").sortable().render(start_cell),
        Column::new("end_date", "Ends").sortable().render(end_cell),
        Column::new("length", "Length").render(length_cell),
        Column::new("is_current", "Current").sortable().render(current_cell),
    ];

    let make_current = move |term: Term| {
        run_mutation(
            toasts,
            api::set_current_term(term.id),
            format!("{} is now the current term", term.name),
            None,
            move |_| query.refresh(),
        );
    };

    let confirm_delete = move |_| {
        let Some(term) = deleting.take() else {
            return;
        };
        run_mutation(
            toasts,
            api::delete_term(term.id),
            format!("{} deleted", term.name),
            None,
            move |_| query.refresh(),
        );
    };

    rsx! {
        div { class: "page",
            ActionBar {
                title: "Academic Terms",
                subtitle: "Term calendar of each school",
                primary_label: "Add Term",
                on_primary: move |_| editing.set(Some(None)),
            }
            div { class: "toolbar",
                FilterSelect {
                    label: "School",
                    value: params.filter("school_id").unwrap_or_default().to_string(),
                    options: schools(),
                    on_change: move |value| query.set_filter("school_id", value),
                }
            }
            DataTable::<Term> {
                columns,
                data: query.items(),
                loading: query.loading(),
                error: query.error(),
                on_retry: move |_| query.refresh(),
                pagination: false,
                on_sort: move |sort| query.set_sort(sort),
                empty_message: "No terms scheduled",
                row_actions: move |term: Term| {
                    let edit = term.clone();
                    let remove = term.clone();
                    let current = term.is_current;
                    rsx! {
                        div { class: "row-actions",
                            button { class: "btn btn-small", onclick: move |_| editing.set(Some(Some(edit.clone()))), "Edit" }
                            if !current {
                                button { class: "btn btn-small", onclick: move |_| make_current(term.clone()), "Make current" }
                            }
                            button { class: "btn btn-small btn-danger", onclick: move |_| deleting.set(Some(remove.clone())), "Delete" }
                        }
                    }
                },
            }
            if let Some(meta) = query.meta() {
                Pager { meta, on_page: move |page| query.set_page(page) }
            }
            if let Some(term) = editing() {
                TermForm {
                    term,
                    school_options: schools(),
                    default_school: params.filter("school_id").and_then(|id| SchoolId::parse(id).ok()),
                    on_close: move |_| editing.set(None),
                    on_saved: move |_| {
                        editing.set(None);
                        query.refresh();
                    },
                }
            }
            ConfirmDialog {
                open: deleting.read().is_some(),
                title: "Delete term",
                message: match &*deleting.read() {
                    Some(term) => format!("Delete {}?", term.name),
                    None => String::new(),
                },
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

#[component]
fn TermForm(
    term: Option<Term>,
    school_options: Vec<(String, String)>,
    default_school: Option<SchoolId>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let toasts = use_toasts();
    let form = use_form_status();
    let id = term.as_ref().map(|t| t.id);
    let mut input = use_signal(|| match term.as_ref() {
        Some(t) => TermInput {
            school_id: Some(t.school_id),
            name: t.name.clone(),
            start_date: Some(t.start_date),
            end_date: Some(t.end_date),
            is_current: Some(t.is_current),
        },
        None => TermInput {
            school_id: default_school,
            ..Default::default()
        },
    });

    let save = move |_| {
        let payload = input();
        let request = async move {
            match id {
                Some(id) => api::update_term(id, payload).await,
                None => api::create_term(payload).await,
            }
        };
        let message = if id.is_some() { "Term updated" } else { "Term created" };
        run_mutation(toasts, request, message, Some(form), move |_| on_saved.call(()));
    };

    let title = if id.is_some() { "Edit Term" } else { "Add Term" }.to_string();
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
                label: "Term name",
                required: true,
                placeholder: "e.g. Autumn 2026",
                value: current.name.clone(),
                error: form.error_for("name"),
                on_change: move |v: String| input.write().name = v,
            }
            div { class: "form-row",
                FormField {
                    label: "Start date",
                    kind: InputKind::Date,
                    required: true,
                    value: date_text(current.start_date),
                    error: form.error_for("start").or_else(|| form.error_for("overlaps")),
                    on_change: move |v: String| input.write().start_date = parse_optional(&v),
                }
                FormField {
                    label: "End date",
                    kind: InputKind::Date,
                    required: true,
                    value: date_text(current.end_date),
                    error: form.error_for("end date is"),
                    on_change: move |v: String| input.write().end_date = parse_optional(&v),
                }
            }
            FormField {
                label: "Current term",
                kind: InputKind::Switch,
                checked: current.is_current.unwrap_or(false),
                help: "Only one term per school can be current",
                on_change: move |v: String| input.write().is_current = Some(v == "true"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_inputs_use_iso_dates() {
        assert_eq!(date_text(NaiveDate::from_ymd_opt(2026, 1, 5)), "2026-01-05");
        assert_eq!(date_text(None), "");
        assert_eq!(parse_optional::<NaiveDate>("2026-01-05"), NaiveDate::from_ymd_opt(2026, 1, 5));
    }
}
