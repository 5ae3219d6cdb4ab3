//! Teacher workspace: gradebook, attendance and assignments of one class.

use dioxus::prelude::*;
use school_core::{Class, ClassId};

use crate::components::{ActionBar, Tabs};
use crate::hooks::{all_rows, settle};

mod assignments;
mod attendance;
mod gradebook;

use assignments::AssignmentsTab;
use attendance::AttendanceTab;
use gradebook::GradebookTab;

#[component]
pub fn TeacherPage() -> Element {
    let classes = use_resource(|| async move { settle(api::get_classes(all_rows(), None).await) });
    let mut picked = use_signal(|| None::<ClassId>);

    let (class_list, load_error): (Vec<Class>, Option<String>) = match &*classes.read() {
        Some(Ok(page)) => (page.items.clone(), None),
        Some(Err(err)) => (Vec::new(), Some(err.error.clone())),
        None => (Vec::new(), None),
    };
    let class = picked()
        .and_then(|id| class_list.iter().find(|c| c.id == id))
        .or_else(|| class_list.first())
        .cloned();
    let subtitle = class
        .as_ref()
        .map(|c| format!("{} · {}", c.name, c.grade_level))
        .unwrap_or_else(|| "No class selected".to_string());

    rsx! {
        div { class: "page",
            ActionBar {
                title: "Teacher Workspace",
                subtitle,
                extra: rsx! {
                    label { class: "filter-select",
                        span { class: "filter-label", "Class" }
                        select {
                            value: class.as_ref().map(|c| c.id.to_string()).unwrap_or_default(),
                            onchange: move |e| picked.set(ClassId::parse(&e.value()).ok()),
                            for c in class_list.iter() {
                                option {
                                    key: "{c.id}",
                                    value: "{c.id}",
                                    selected: class.as_ref().is_some_and(|current| current.id == c.id),
                                    "{c.name}"
                                }
                            }
                        }
                    }
                },
            }
            if let Some(err) = load_error {
                div { class: "alert alert-error", role: "alert", "{err}" }
            }
            if !classes.finished() {
                p { class: "muted", "Loading classes..." }
            }
            if let Some(class) = class {
                // Keyed so switching class starts every tab afresh.
                div { key: "{class.id}",
                    Tabs {
                        labels: vec!["Gradebook".to_string(), "Attendance".to_string(), "Assignments".to_string()],
                        panel: move |tab: usize| {
                            let class = class.clone();
                            match tab {
                                0 => rsx! { GradebookTab { class } },
                                1 => rsx! { AttendanceTab { class } },
                                _ => rsx! { AssignmentsTab { class } },
                            }
                        },
                    }
                }
            }
        }
    }
}
