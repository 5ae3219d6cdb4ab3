use dioxus::prelude::*;
use school_core::{BillingCycle, ListParams, Plan, PlanInput, PlanLimits, SortDirection};

use crate::components::{
    ActionBar, Column, ConfirmDialog, DataTable, FilterSelect, FormField, InputKind, Modal, Pager, SearchInput,
    StatusBadge, use_toasts,
};
use crate::hooks::use_list_query;

use super::{enum_options, parse_optional, run_mutation, use_form_status};

fn price_cell(plan: &Plan) -> Element {
    let per = match plan.billing_cycle {
        BillingCycle::Monthly => "mo",
        BillingCycle::Yearly => "yr",
    };
    let price = format!("${:.2} / {per}", plan.price);
    rsx! { "{price}" }
}

fn active_cell(plan: &Plan) -> Element {
    let status = if plan.is_active { "active" } else { "inactive" };
    rsx! { StatusBadge { status: status.to_string() } }
}

fn features_cell(plan: &Plan) -> Element {
    rsx! {
        ul { class: "feature-list",
            for feature in plan.features.iter() {
                li { key: "{feature}", "{feature}" }
            }
        }
    }
}

#[component]
pub fn PlansPage() -> Element {
    let toasts = use_toasts();
    let query = use_list_query(ListParams::new().sorted_by("price", SortDirection::Asc), api::get_plans);
    let mut editing = use_signal(|| None::<Option<Plan>>);
    let mut deleting = use_signal(|| None::<Plan>);

    let params = query.params();
    let columns = vec![
        Column::new("name", "Plan").sortable(),
        Column::new("price", "Price").sortable().render(price_cell),
        Column::new("max_students", "Students").sortable(),
        Column::new("max_branches", "Branches").sortable(),
        Column::new("storage_gb", "Storage (GB)").sortable(),
        Column::new("features", "Features").render(features_cell),
        Column::new("is_active", "Status").sortable().render(active_cell),
    ];

    let toggle = move |plan: Plan| {
        let message = if plan.is_active {
            format!("{} deactivated", plan.name)
        } else {
            format!("{} activated", plan.name)
        };
        run_mutation(toasts, api::toggle_plan(plan.id), message, None, move |_| query.refresh());
    };

    let confirm_delete = move |_| {
        let Some(plan) = deleting.take() else {
            return;
        };
        run_mutation(
            toasts,
            api::delete_plan(plan.id),
            format!("{} deleted", plan.name),
            None,
            move |_| query.refresh(),
        );
    };

    rsx! {
        div { class: "page",
            ActionBar {
                title: "Plans",
                subtitle: "Subscription plans offered to schools",
                primary_label: "Add Plan",
                on_primary: move |_| editing.set(Some(None)),
            }
            div { class: "toolbar",
                SearchInput {
                    value: params.search.clone().unwrap_or_default(),
                    placeholder: "Search plans...",
                    on_search: move |term| query.set_search(term),
                }
                FilterSelect {
                    label: "Billing",
                    value: params.filter("billing_cycle").unwrap_or_default().to_string(),
                    options: enum_options(&BillingCycle::ALL, BillingCycle::as_str),
                    on_change: move |value| query.set_filter("billing_cycle", value),
                }
                FilterSelect {
                    label: "Status",
                    value: params.filter("is_active").unwrap_or_default().to_string(),
                    options: vec![
                        ("true".to_string(), "Active".to_string()),
                        ("false".to_string(), "Inactive".to_string()),
                    ],
                    on_change: move |value| query.set_filter("is_active", value),
                }
            }
            DataTable::<Plan> {
                columns,
                data: query.items(),
                loading: query.loading(),
                error: query.error(),
                on_retry: move |_| query.refresh(),
                pagination: false,
                on_sort: move |sort| query.set_sort(sort),
                empty_message: "No plans yet",
                row_actions: move |plan: Plan| {
                    let edit = plan.clone();
                    let remove = plan.clone();
                    let active = plan.is_active;
                    rsx! {
                        div { class: "row-actions",
                            button { class: "btn btn-small", onclick: move |_| editing.set(Some(Some(edit.clone()))), "Edit" }
                            button {
                                class: "btn btn-small",
                                onclick: move |_| toggle(plan.clone()),
                                if active { "Deactivate" } else { "Activate" }
                            }
                            button { class: "btn btn-small btn-danger", onclick: move |_| deleting.set(Some(remove.clone())), "Delete" }
                        }
                    }
                },
            }
            if let Some(meta) = query.meta() {
                Pager { meta, on_page: move |page| query.set_page(page) }
            }
            if let Some(plan) = editing() {
                PlanForm {
                    plan,
                    on_close: move |_| editing.set(None),
                    on_saved: move |_| {
                        editing.set(None);
                        query.refresh();
                    },
                }
            }
            ConfirmDialog {
                open: deleting.read().is_some(),
                title: "Delete plan",
                message: match &*deleting.read() {
                    Some(plan) => format!("Delete the {} plan? Plans still used by a school cannot be deleted.", plan.name),
                    None => String::new(),
                },
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

/// Form state kept as text so partially typed numbers survive re-renders.
#[derive(Clone, Default, PartialEq)]
struct PlanDraft {
    name: String,
    price: String,
    billing_cycle: BillingCycle,
    max_students: String,
    max_branches: String,
    storage_gb: String,
    features: String,
    is_active: bool,
}

impl PlanDraft {
    fn new(plan: Option<&Plan>) -> Self {
        let input = plan.map(PlanInput::from).unwrap_or_default();
        let limits = input.limits.unwrap_or_default();
        Self {
            name: input.name,
            price: input.price.map(|p| p.to_string()).unwrap_or_default(),
            billing_cycle: input.billing_cycle.unwrap_or_default(),
            max_students: limits.max_students.to_string(),
            max_branches: limits.max_branches.to_string(),
            storage_gb: limits.storage_gb.to_string(),
            features: input.features.join("\n"),
            is_active: input.is_active.unwrap_or(true),
        }
    }

    fn to_input(&self) -> PlanInput {
        let defaults = PlanLimits::default();
        PlanInput {
            name: self.name.clone(),
            price: parse_optional(&self.price),
            billing_cycle: Some(self.billing_cycle),
            limits: Some(PlanLimits {
                max_students: parse_optional(&self.max_students).unwrap_or(defaults.max_students),
                max_branches: parse_optional(&self.max_branches).unwrap_or(defaults.max_branches),
                storage_gb: parse_optional(&self.storage_gb).unwrap_or(defaults.storage_gb),
            }),
            features: self.features.lines().map(str::to_string).collect(),
            is_active: Some(self.is_active),
        }
    }
}

#[component]
fn PlanForm(plan: Option<Plan>, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let toasts = use_toasts();
    let form = use_form_status();
    let id = plan.as_ref().map(|p| p.id);
    let mut draft = use_signal(|| PlanDraft::new(plan.as_ref()));

    let save = move |_| {
        let payload = draft.read().to_input();
        let request = async move {
            match id {
                Some(id) => api::update_plan(id, payload).await,
                None => api::create_plan(payload).await,
            }
        };
        let message = if id.is_some() { "Plan updated" } else { "Plan created" };
        run_mutation(toasts, request, message, Some(form), move |_| on_saved.call(()));
    };

    let title = if id.is_some() { "Edit Plan" } else { "Add Plan" }.to_string();
    let current = draft.read().clone();

    rsx! {
        Modal {
            open: true,
            title,
            class: "modal-wide",
            on_close: move |_| on_close.call(()),
            footer: rsx! {
                button { class: "btn btn-secondary", onclick: move |_| on_close.call(()), "Cancel" }
                button { class: "btn btn-primary", disabled: form.busy(), onclick: save, "Save" }
            },
            FormField {
                label: "Plan name",
                required: true,
                value: current.name.clone(),
                error: form.error_for("name"),
                on_change: move |v: String| draft.write().name = v,
            }
            div { class: "form-row",
                FormField {
                    label: "Price",
                    kind: InputKind::Number,
                    required: true,
                    min: "0",
                    step: "0.01",
                    value: current.price.clone(),
                    error: form.error_for("price"),
                    on_change: move |v: String| draft.write().price = v,
                }
                FormField {
                    label: "Billing cycle",
                    kind: InputKind::Radio,
                    value: current.billing_cycle.as_str().to_string(),
                    options: enum_options(&BillingCycle::ALL, BillingCycle::as_str),
                    on_change: move |v: String| {
                        if let Some(cycle) = BillingCycle::parse(&v) {
                            draft.write().billing_cycle = cycle;
                        }
                    },
                }
            }
            div { class: "form-row",
                FormField {
                    label: "Max students",
                    kind: InputKind::Number,
                    min: "0",
                    value: current.max_students.clone(),
                    on_change: move |v: String| draft.write().max_students = v,
                }
                FormField {
                    label: "Max branches",
                    kind: InputKind::Number,
                    min: "0",
                    value: current.max_branches.clone(),
                    on_change: move |v: String| draft.write().max_branches = v,
                }
                FormField {
                    label: "Storage (GB)",
                    kind: InputKind::Number,
                    min: "0",
                    value: current.storage_gb.clone(),
                    on_change: move |v: String| draft.write().storage_gb = v,
                }
            }
            FormField {
                label: "Features",
                kind: InputKind::Textarea,
                rows: 4,
                help: "One feature per line",
                value: current.features.clone(),
                on_change: move |v: String| draft.write().features = v,
            }
            FormField {
                label: "Available to schools",
                kind: InputKind::Switch,
                checked: current.is_active,
                on_change: move |v: String| draft.write().is_active = v == "true",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_keeps_text_and_falls_back_to_default_limits() {
        let draft = PlanDraft {
            name: "Starter".into(),
            price: "19.5".into(),
            max_students: "250".into(),
            max_branches: "".into(),
            storage_gb: "lots".into(),
            features: "Gradebook\nAttendance".into(),
            is_active: true,
            ..Default::default()
        };
        let input = draft.to_input();
        assert_eq!(input.price, Some(19.5));
        let limits = input.limits.unwrap_or_default();
        assert_eq!(limits.max_students, 250);
        assert_eq!(limits.max_branches, PlanLimits::default().max_branches);
        assert_eq!(limits.storage_gb, PlanLimits::default().storage_gb);
        assert_eq!(input.features, vec!["Gradebook", "Attendance"]);
    }

    #[test]
    fn blank_price_is_left_for_the_server_to_reject() {
        let input = PlanDraft::new(None).to_input();
        assert_eq!(input.price, None);
        assert_eq!(input.is_active, Some(true));
    }
}
