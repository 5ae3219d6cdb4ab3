use dioxus::prelude::*;
use school_core::gradebook::{export_csv, export_filename};
use school_core::{AssignmentId, Class, GradeInput, Gradebook, StudentId, format_number};

use crate::components::use_toasts;
use crate::hooks::settle;
use crate::pages::run_mutation;

/// Script that hands `csv` to the browser as a file download.
pub(crate) fn download_script(filename: &str, csv: &str) -> Result<String, serde_json::Error> {
    let filename = serde_json::to_string(filename)?;
    let csv = serde_json::to_string(csv)?;
    Ok(format!(
        "const blob = new Blob([{csv}], {{ type: 'text/csv;charset=utf-8' }});\n\
         const link = document.createElement('a');\n\
         link.href = URL.createObjectURL(blob);\n\
         link.download = {filename};\n\
         document.body.appendChild(link);\n\
         link.click();\n\
         link.remove();\n\
         URL.revokeObjectURL(link.href);"
    ))
}

fn score_text(score: Option<f64>) -> String {
    score.map(format_number).unwrap_or_default()
}

fn average_text(average: Option<f64>) -> String {
    average.map(|a| format!("{a:.2}")).unwrap_or_else(|| "N/A".to_string())
}

#[component]
pub(super) fn GradebookTab(class: Class) -> Element {
    let toasts = use_toasts();
    let class_id = class.id;
    let mut book = use_resource(move || async move { settle(api::get_gradebook(class_id).await) });

    let save = move |(student_id, assignment_id, text): (StudentId, AssignmentId, String)| {
        let text = text.trim().to_string();
        let score = if text.is_empty() {
            None
        } else {
            match text.parse::<f64>() {
                Ok(score) => Some(score),
                Err(_) => {
                    toasts.error(format!("{text} is not a score"));
                    return;
                }
            }
        };
        let input = GradeInput {
            assignment_id,
            student_id,
            score,
        };
        run_mutation(toasts, api::record_grade(input), "Grade saved", None, move |_| book.restart());
    };

    let class_name = class.name.clone();
    let export = move |_| {
        let loaded = book.read();
        let Some(Ok(gradebook)) = &*loaded else {
            toasts.error("The gradebook has not loaded yet");
            return;
        };
        let filename = export_filename(&class_name);
        match download_script(&filename, &export_csv(gradebook)) {
            Ok(script) => {
                document::eval(&script);
                toasts.info(format!("Downloading {filename}"));
            }
            Err(err) => toasts.error(format!("Export failed: {err}")),
        }
    };

    rsx! {
        div { class: "gradebook",
            div { class: "tab-toolbar",
                button { class: "btn btn-secondary", onclick: export, "Export CSV" }
            }
            {match &*book.read() {
                None => rsx! { p { class: "muted", "Loading gradebook..." } },
                Some(Err(err)) => rsx! {
                    div { class: "alert alert-error", role: "alert",
                        "{err.error}"
                        button { class: "btn btn-small", onclick: move |_| book.restart(), "Retry" }
                    }
                },
                Some(Ok(gradebook)) => rsx! { GradebookGrid { gradebook: gradebook.clone(), on_score: save } },
            }}
        }
    }
}

#[component]
fn GradebookGrid(gradebook: Gradebook, on_score: Callback<(StudentId, AssignmentId, String)>) -> Element {
    if gradebook.students.is_empty() {
        return rsx! { p { class: "muted", "No students are enrolled in this class." } };
    }

    let rows = gradebook.rows();

    rsx! {
        div { class: "table-container",
            table { class: "data-table gradebook-table",
                thead {
                    tr {
                        th { scope: "col", "Student" }
                        th { scope: "col", "Roll" }
                        for assignment in gradebook.assignments.iter() {
                            th { key: "{assignment.id}", scope: "col",
                                "{assignment.title}"
                                span { class: "max-score", " /{format_number(assignment.max_score)}" }
                            }
                        }
                        th { scope: "col", "Average" }
                    }
                }
                tbody {
                    for row in rows.iter() {
                        tr { key: "{row.student.id}",
                            td { "{row.student.name}" }
                            td { "{row.student.roll_number}" }
                            for (assignment, score) in gradebook.assignments.iter().zip(row.scores.iter()) {
                                {
                                    let student_id = row.student.id;
                                    let assignment_id = assignment.id;
                                    rsx! {
                                        td { key: "{assignment_id}",
                                            input {
                                                class: "score-input",
                                                r#type: "number",
                                                min: "0",
                                                max: "{assignment.max_score}",
                                                step: "0.5",
                                                "aria-label": "{assignment.title} score for {row.student.name}",
                                                value: "{score_text(*score)}",
                                                onchange: move |e| on_score.call((student_id, assignment_id, e.value())),
                                            }
                                        }
                                    }
                                }
                            }
                            td { class: "average", "{average_text(row.average)}" }
                        }
                    }
                }
                tfoot {
                    tr {
                        th { scope: "row", colspan: "2", "Class average" }
                        for assignment in gradebook.assignments.iter() {
                            td { key: "{assignment.id}", "{average_text(gradebook.assignment_average(assignment.id))}" }
                        }
                        td {}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_script_escapes_payload() {
        let script = download_script("gradebook-math.csv", "Name,Score\n\"Lee, Sam\",9\n");
        let script = script.unwrap_or_default();
        assert!(script.contains(r#"link.download = "gradebook-math.csv";"#));
        assert!(script.contains(r#"new Blob(["Name,Score\n\"Lee, Sam\",9\n"]"#));
    }

    #[test]
    fn score_cells() {
        assert_eq!(score_text(Some(18.0)), "18");
        assert_eq!(score_text(Some(16.5)), "16.5");
        assert_eq!(score_text(None), "");
        assert_eq!(average_text(Some(17.25)), "17.25");
        assert_eq!(average_text(None), "N/A");
    }
}
