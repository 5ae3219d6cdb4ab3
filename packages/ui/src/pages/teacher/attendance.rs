use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use dioxus::prelude::*;
use school_core::{
    AttendanceEntry, AttendanceInput, AttendanceStatus, AttendanceSummary, Class, ListParams, SortDirection,
    Student, StudentId,
};

use crate::components::{FormField, InputKind, StatusBadge, use_toasts};
use crate::hooks::settle;
use crate::pages::{enum_options, format_date, run_mutation};

/// Register entries for the whole roster; unmarked students count as present.
fn roster_entries(roster: &[Student], marks: &HashMap<StudentId, AttendanceStatus>) -> Vec<AttendanceEntry> {
    roster
        .iter()
        .map(|student| AttendanceEntry {
            student_id: student.id,
            status: marks.get(&student.id).copied().unwrap_or_default(),
        })
        .collect()
}

#[component]
pub(super) fn AttendanceTab(class: Class) -> Element {
    let toasts = use_toasts();
    let class_id = class.id;
    let mut date = use_signal(|| Utc::now().date_naive());
    let mut marks = use_signal(HashMap::<StudentId, AttendanceStatus>::new);

    let roster = use_resource(move || async move {
        let params = ListParams::new().with_limit(500).sorted_by("name", SortDirection::Asc);
        settle(api::get_students(class_id, params).await)
            .map(|page| page.items)
            .unwrap_or_default()
    });
    let records = use_resource(move || {
        let day = date();
        async move { settle(api::get_attendance(class_id, day).await) }
    });
    let mut summary = use_resource(move || async move { settle(api::get_attendance_summary(class_id).await) });

    // Saved marks for the chosen day replace whatever was being edited.
    use_effect(move || {
        if let Some(Ok(saved)) = &*records.read() {
            marks.set(saved.iter().map(|r| (r.student_id, r.status)).collect());
        }
    });

    let students: Vec<Student> = roster.read().clone().unwrap_or_default();
    let already_saved = matches!(&*records.read(), Some(Ok(saved)) if !saved.is_empty());

    let mark_all_present = {
        let students = students.clone();
        move |_| {
            marks.set(
                students
                    .iter()
                    .map(|s| (s.id, AttendanceStatus::Present))
                    .collect(),
            )
        }
    };

    let save = {
        let students = students.clone();
        move |_| {
            let input = AttendanceInput {
                class_id,
                date: date(),
                entries: roster_entries(&students, &marks.read()),
            };
            let message = format!("Attendance saved for {}", format_date(input.date));
            run_mutation(toasts, api::mark_attendance(input), message, None, move |_| summary.restart());
        }
    };

    rsx! {
        div { class: "attendance",
            div { class: "tab-toolbar",
                FormField {
                    label: "Date",
                    kind: InputKind::Date,
                    value: date().format("%Y-%m-%d").to_string(),
                    on_change: move |v: String| {
                        if let Ok(day) = v.parse::<NaiveDate>() {
                            date.set(day);
                        }
                    },
                }
                button { class: "btn btn-secondary", onclick: mark_all_present, "Mark all present" }
                button { class: "btn btn-primary", disabled: students.is_empty(), onclick: save,
                    if already_saved { "Update register" } else { "Save register" }
                }
            }
            if students.is_empty() && roster.finished() {
                p { class: "muted", "No students are enrolled in this class." }
            }
            table { class: "data-table attendance-table",
                thead {
                    tr {
                        th { scope: "col", "Roll" }
                        th { scope: "col", "Student" }
                        th { scope: "col", "Status" }
                    }
                }
                tbody {
                    for student in students.iter() {
                        {
                            let student_id = student.id;
                            let status = marks.read().get(&student_id).copied().unwrap_or_default();
                            rsx! {
                                tr { key: "{student_id}",
                                    td { "{student.roll_number}" }
                                    td { "{student.name}" }
                                    td {
                                        FormField {
                                            label: "Status",
                                            id: format!("attendance-{student_id}"),
                                            kind: InputKind::Radio,
                                            value: status.as_str().to_string(),
                                            options: enum_options(&AttendanceStatus::ALL, AttendanceStatus::as_str),
                                            on_change: move |v: String| {
                                                if let Some(status) = AttendanceStatus::parse(&v) {
                                                    marks.write().insert(student_id, status);
                                                }
                                            },
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            {match &*summary.read() {
                Some(Ok(totals)) => rsx! { SummaryCard { summary: *totals } },
                _ => rsx! {},
            }}
        }
    }
}

#[component]
fn SummaryCard(summary: AttendanceSummary) -> Element {
    let rate = summary
        .rate()
        .map(|r| format!("{r:.1}%"))
        .unwrap_or_else(|| "N/A".to_string());

    rsx! {
        section { class: "card attendance-summary",
            h3 { "Attendance to date" }
            div { class: "summary-counts",
                for status in AttendanceStatus::ALL {
                    {
                        let count = match status {
                            AttendanceStatus::Present => summary.present,
                            AttendanceStatus::Absent => summary.absent,
                            AttendanceStatus::Late => summary.late,
                            AttendanceStatus::Excused => summary.excused,
                        };
                        rsx! {
                            div { key: "{status.as_str()}", class: "summary-count",
                                StatusBadge { status: status.as_str().to_string() }
                                span { "{count}" }
                            }
                        }
                    }
                }
            }
            p { "Attendance rate: {rate} over {summary.total()} records" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_core::ClassId;

    #[test]
    fn unmarked_students_default_to_present() {
        let class = ClassId::new();
        let roster = vec![Student::new(class, "Ada", "01"), Student::new(class, "Ben", "02")];
        let mut marks = HashMap::new();
        marks.insert(roster[1].id, AttendanceStatus::Absent);

        let entries = roster_entries(&roster, &marks);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].status, AttendanceStatus::Present);
        assert_eq!(entries[1].status, AttendanceStatus::Absent);
        assert_eq!(entries[1].student_id, roster[1].id);
    }
}
