//! One screen per admin area.

use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};
use dioxus::prelude::*;
use school_core::ApiResult;

use crate::components::Toasts;
use crate::hooks::{settle, use_school_options};

mod audit_logs;
mod branches;
mod dashboard;
mod plans;
mod schools;
mod teacher;
mod terms;
mod tickets;
mod users;

pub use audit_logs::AuditLogsPage;
pub use branches::BranchesPage;
pub use dashboard::DashboardPage;
pub use plans::PlansPage;
pub use schools::SchoolsPage;
pub use teacher::TeacherPage;
pub use terms::TermsPage;
pub use tickets::TicketsPage;
pub use users::UsersPage;

/// School names by id, shared with table cells that only see a row.
#[derive(Clone, Copy)]
pub(crate) struct SchoolNames(pub Memo<Vec<(String, String)>>);

/// Load the school options and make them available to [`SchoolName`] cells.
pub(crate) fn use_school_names() -> Memo<Vec<(String, String)>> {
    let options = use_school_options();
    use_context_provider(|| SchoolNames(options));
    options
}

#[component]
pub(crate) fn SchoolName(id: String) -> Element {
    let name = try_use_context::<SchoolNames>()
        .and_then(|names| {
            names
                .0
                .read()
                .iter()
                .find(|(key, _)| *key == id)
                .map(|(_, name)| name.clone())
        })
        .unwrap_or_else(|| "Unknown school".to_string());

    rsx! { span { class: "school-name", "{name}" } }
}

/// Error and busy state of an open form.
#[derive(Clone, Copy, PartialEq)]
pub(crate) struct FormStatus {
    pub error: Signal<Option<String>>,
    pub busy: Signal<bool>,
}

impl FormStatus {
    /// The form error if it mentions `keyword`, for inline display under a field.
    pub fn error_for(&self, keyword: &str) -> Option<String> {
        field_error(&self.error.read(), keyword)
    }

    pub fn busy(&self) -> bool {
        *self.busy.read()
    }
}

pub(crate) fn use_form_status() -> FormStatus {
    FormStatus {
        error: use_signal(|| None),
        busy: use_signal(|| false),
    }
}

/// Run a mutation and report the outcome as a toast.
///
/// Rejections below 500 also land in the form's error slot so the form can
/// show them next to the offending field.
pub(crate) fn run_mutation<T, Fut>(
    toasts: Toasts,
    request: Fut,
    success: impl Into<String>,
    form: Option<FormStatus>,
    on_done: impl FnOnce(T) + 'static,
) where
    T: 'static,
    Fut: Future<Output = Result<ApiResult<T>, ServerFnError>> + 'static,
{
    let success = success.into();
    if let Some(mut form) = form {
        form.busy.set(true);
    }
    spawn(async move {
        let outcome = settle(request.await);
        if let Some(mut form) = form {
            form.busy.set(false);
        }
        match outcome {
            Ok(value) => {
                if let Some(mut form) = form {
                    form.error.set(None);
                }
                toasts.success(success);
                on_done(value);
            }
            Err(err) => {
                tracing::warn!(status = err.status, "request rejected: {}", err.error);
                if let Some(mut form) = form
                    && err.status < 500
                {
                    form.error.set(Some(err.error.clone()));
                }
                toasts.error(err.error);
            }
        }
    });
}

/// The error if it mentions `keyword`.
pub(crate) fn field_error(error: &Option<String>, keyword: &str) -> Option<String> {
    error
        .as_ref()
        .filter(|message| message.to_lowercase().contains(keyword))
        .cloned()
}

/// `(value, label)` options from an enum's `ALL` list.
pub(crate) fn enum_options<E: Copy>(all: &[E], value: fn(E) -> &'static str) -> Vec<(String, String)> {
    all.iter()
        .map(|&e| (value(e).to_string(), crate::components::title_case(value(e))))
        .collect()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub(crate) fn format_time(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y %H:%M").to_string()
}

/// Empty text becomes `None`, anything else must parse.
pub(crate) fn parse_optional<T: std::str::FromStr>(text: &str) -> Option<T> {
    let text = text.trim();
    if text.is_empty() { None } else { text.parse().ok() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_core::SchoolStatus;

    #[test]
    fn field_errors_match_by_keyword() {
        let error = Some("School name is required".to_string());
        assert_eq!(field_error(&error, "name").as_deref(), Some("School name is required"));
        assert_eq!(field_error(&error, "location"), None);
        assert_eq!(field_error(&None, "name"), None);
    }

    #[test]
    fn options_use_wire_values_and_title_case_labels() {
        let options = enum_options(&SchoolStatus::ALL, SchoolStatus::as_str);
        assert_eq!(options[0], ("active".to_string(), "Active".to_string()));
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn optional_numbers() {
        assert_eq!(parse_optional::<u32>(" 42 "), Some(42));
        assert_eq!(parse_optional::<u32>(""), None);
        assert_eq!(parse_optional::<f64>("abc"), None);
    }
}
