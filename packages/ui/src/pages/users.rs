use dioxus::prelude::*;
use school_core::{BranchId, ListParams, Role, SchoolId, SortDirection, User, UserInput, UserStatus};

use crate::components::{
    ActionBar, Column, ConfirmDialog, DataTable, FilterSelect, FormField, InputKind, Modal, Pager, SearchInput,
    StatusBadge, use_toasts,
};
use crate::hooks::{all_rows, settle, use_list_query};

use super::{SchoolName, enum_options, format_time, run_mutation, use_form_status, use_school_names};

fn role_options() -> Vec<(String, String)> {
    Role::ALL
        .iter()
        .map(|r| (r.as_str().to_string(), r.label().to_string()))
        .collect()
}

fn role_cell(user: &User) -> Element {
    rsx! { span { class: "role role-{user.role.as_str()}", "{user.role.label()}" } }
}

fn school_cell(user: &User) -> Element {
    match user.school_id {
        Some(id) => rsx! { SchoolName { id: id.to_string() } },
        None => rsx! { span { class: "muted", "Platform" } },
    }
}

fn status_cell(user: &User) -> Element {
    rsx! { StatusBadge { status: user.status.as_str().to_string() } }
}

fn created_cell(user: &User) -> Element {
    rsx! { "{format_time(user.created_at)}" }
}

fn input_from(user: &User) -> UserInput {
    UserInput {
        name: user.name.clone(),
        email: user.email.clone(),
        role: Some(user.role),
        school_id: user.school_id,
        branch_id: user.branch_id,
        status: Some(user.status),
    }
}

#[component]
pub fn UsersPage() -> Element {
    let toasts = use_toasts();
    let schools = use_school_names();
    let query = use_list_query(ListParams::new().sorted_by("name", SortDirection::Asc), api::get_users);
    let mut editing = use_signal(|| None::<Option<User>>);
    let mut deleting = use_signal(|| None::<User>);

    let params = query.params();
    let columns = vec![
        Column::new("name", "Name").sortable(),
        Column::new("email", "Email").sortable(),
        Column::new("role", "Role").sortable().render(role_cell),
        Column::new("school_id", "School").render(school_cell),
        Column::new("status", "Status").sortable().render(status_cell),
        Column::new("created_at", "Joined").sortable().render(created_cell),
    ];

    let confirm_delete = move |_| {
        let Some(user) = deleting.take() else {
            return;
        };
        run_mutation(
            toasts,
            api::delete_user(user.id),
            format!("{} removed", user.name),
            None,
            move |_| query.refresh(),
        );
    };

    rsx! {
        div { class: "page",
            ActionBar {
                title: "Users",
                subtitle: "Staff, students and parents across all schools",
                primary_label: "Add User",
                on_primary: move |_| editing.set(Some(None)),
            }
            div { class: "toolbar",
                SearchInput {
                    value: params.search.clone().unwrap_or_default(),
                    placeholder: "Search by name or email...",
                    on_search: move |term| query.set_search(term),
                }
                FilterSelect {
                    label: "Role",
                    value: params.filter("role").unwrap_or_default().to_string(),
                    options: role_options(),
                    on_change: move |value| query.set_filter("role", value),
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
                    options: enum_options(&UserStatus::ALL, UserStatus::as_str),
                    on_change: move |value| query.set_filter("status", value),
                }
            }
            DataTable::<User> {
                columns,
                data: query.items(),
                loading: query.loading(),
                error: query.error(),
                on_retry: move |_| query.refresh(),
                pagination: false,
                on_sort: move |sort| query.set_sort(sort),
                empty_message: "No users found",
                row_actions: move |user: User| {
                    let edit = user.clone();
                    rsx! {
                        div { class: "row-actions",
                            button { class: "btn btn-small", onclick: move |_| editing.set(Some(Some(edit.clone()))), "Edit" }
                            button { class: "btn btn-small btn-danger", onclick: move |_| deleting.set(Some(user.clone())), "Delete" }
                        }
                    }
                },
            }
            if let Some(meta) = query.meta() {
                Pager { meta, on_page: move |page| query.set_page(page) }
            }
            if let Some(user) = editing() {
                UserForm {
                    user,
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
                title: "Delete user",
                message: match &*deleting.read() {
                    Some(user) => format!("Delete {} ({})?", user.name, user.email),
                    None => String::new(),
                },
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn UserForm(
    user: Option<User>,
    school_options: Vec<(String, String)>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let toasts = use_toasts();
    let form = use_form_status();
    let id = user.as_ref().map(|u| u.id);
    let mut input = use_signal(|| user.as_ref().map(input_from).unwrap_or_default());

    // Branch choices follow the selected school.
    let school_id = use_memo(move || input.read().school_id);
    let branches = use_resource(move || {
        let school = school_id();
        async move {
            match school {
                Some(id) => settle(api::get_branches(all_rows(), Some(id)).await)
                    .map(|page| page.items)
                    .unwrap_or_default(),
                None => Vec::new(),
            }
        }
    });
    let branch_options: Vec<(String, String)> = match &*branches.read() {
        Some(items) => items.iter().map(|b| (b.id.to_string(), b.name.clone())).collect(),
        None => Vec::new(),
    };

    let save = move |_| {
        let payload = input();
        let request = async move {
            match id {
                Some(id) => api::update_user(id, payload).await,
                None => api::create_user(payload).await,
            }
        };
        let message = if id.is_some() { "User updated" } else { "User created" };
        run_mutation(toasts, request, message, Some(form), move |_| on_saved.call(()));
    };

    let title = if id.is_some() { "Edit User" } else { "Add User" }.to_string();
    let current = input.read().clone();
    let platform_role = current.role.is_some_and(Role::is_platform);
    let school_help = if platform_role {
        "Platform roles are not tied to a school"
    } else {
        "Required for school roles"
    }
    .to_string();

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
                label: "Full name",
                required: true,
                value: current.name.clone(),
                error: form.error_for("name"),
                on_change: move |v: String| input.write().name = v,
            }
            FormField {
                label: "Email",
                kind: InputKind::Email,
                required: true,
                value: current.email.clone(),
                error: form.error_for("email"),
                on_change: move |v: String| input.write().email = v,
            }
            FormField {
                label: "Role",
                kind: InputKind::Select,
                required: true,
                value: current.role.map(|r| r.as_str().to_string()).unwrap_or_default(),
                options: role_options(),
                error: form.error_for("role"),
                on_change: move |v: String| {
                    let role = Role::parse(&v);
                    let mut draft = input.write();
                    draft.role = role;
                    if role.is_some_and(Role::is_platform) {
                        draft.school_id = None;
                        draft.branch_id = None;
                    }
                },
            }
            FormField {
                label: "School",
                kind: InputKind::Select,
                value: current.school_id.map(|s| s.to_string()).unwrap_or_default(),
                options: school_options,
                disabled: platform_role,
                help: school_help,
                error: form.error_for("school"),
                on_change: move |v: String| {
                    let mut draft = input.write();
                    draft.school_id = SchoolId::parse(&v).ok();
                    draft.branch_id = None;
                },
            }
            FormField {
                label: "Branch",
                kind: InputKind::Select,
                placeholder: "No branch",
                value: current.branch_id.map(|b| b.to_string()).unwrap_or_default(),
                options: branch_options,
                disabled: current.school_id.is_none(),
                error: form.error_for("branch"),
                on_change: move |v: String| input.write().branch_id = BranchId::parse(&v).ok(),
            }
            FormField {
                label: "Status",
                kind: InputKind::Select,
                required: true,
                value: current.status.unwrap_or_default().as_str().to_string(),
                options: enum_options(&UserStatus::ALL, UserStatus::as_str),
                on_change: move |v: String| input.write().status = UserStatus::parse(&v),
            }
        }
    }
}
