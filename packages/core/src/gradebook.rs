//! Gradebook views and the CSV export teachers download.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::academic::{Assignment, AttendanceRecord, AttendanceStatus, Class, Grade, Student};
use crate::ids::{AssignmentId, StudentId};
use crate::record::format_number;

/// Students, assignments and grades of one class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gradebook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<Class>,
    pub students: Vec<Student>,
    pub assignments: Vec<Assignment>,
    pub grades: Vec<Grade>,
}

/// One student's line in the gradebook.
#[derive(Debug, Clone, PartialEq)]
pub struct GradebookRow<'a> {
    pub student: &'a Student,
    /// Scores in assignment order.
    pub scores: Vec<Option<f64>>,
    pub average: Option<f64>,
}

impl Gradebook {
    fn score_index(&self) -> HashMap<(StudentId, AssignmentId), f64> {
        self.grades
            .iter()
            .filter_map(|g| g.score.map(|s| ((g.student_id, g.assignment_id), s)))
            .collect()
    }

    /// Score of one student on one assignment, if marked.
    pub fn score(&self, student_id: StudentId, assignment_id: AssignmentId) -> Option<f64> {
        self.grades
            .iter()
            .find(|g| g.student_id == student_id && g.assignment_id == assignment_id)
            .and_then(|g| g.score)
    }

    /// Rows in student order with scores in assignment order.
    pub fn rows(&self) -> Vec<GradebookRow<'_>> {
        let index = self.score_index();
        self.students
            .iter()
            .map(|student| {
                let scores: Vec<Option<f64>> = self
                    .assignments
                    .iter()
                    .map(|a| index.get(&(student.id, a.id)).copied())
                    .collect();
                let average = mean(scores.iter().flatten().copied());
                GradebookRow {
                    student,
                    scores,
                    average,
                }
            })
            .collect()
    }

    /// Mean of the raw scores a student has been given.
    pub fn student_average(&self, student_id: StudentId) -> Option<f64> {
        mean(
            self.grades
                .iter()
                .filter(|g| g.student_id == student_id)
                .filter(|g| self.assignments.iter().any(|a| a.id == g.assignment_id))
                .filter_map(|g| g.score),
        )
    }

    /// Mean score on one assignment across the class.
    pub fn assignment_average(&self, assignment_id: AssignmentId) -> Option<f64> {
        mean(
            self.grades
                .iter()
                .filter(|g| g.assignment_id == assignment_id)
                .filter_map(|g| g.score),
        )
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

const MISSING: &str = "N/A";

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line(fields: impl IntoIterator<Item = String>) -> String {
    let mut line = fields
        .into_iter()
        .map(|f| csv_field(&f))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// Render the gradebook as CSV.
///
/// Header: student name, roll number, one column per assignment title, average.
/// Cells hold the raw score or `N/A`; the average has two decimals.
pub fn export_csv(gradebook: &Gradebook) -> String {
    let mut header = vec!["Student Name".to_string(), "Roll Number".to_string()];
    header.extend(gradebook.assignments.iter().map(|a| a.title.clone()));
    header.push("Average".to_string());

    let mut csv = csv_line(header);
    for row in gradebook.rows() {
        let mut fields = vec![row.student.name.clone(), row.student.roll_number.clone()];
        fields.extend(row.scores.iter().map(|score| match score {
            Some(s) => format_number(*s),
            None => MISSING.to_string(),
        }));
        fields.push(match row.average {
            Some(avg) => format!("{:.2}", avg),
            None => MISSING.to_string(),
        });
        csv.push_str(&csv_line(fields));
    }
    csv
}

/// File name offered for a class export.
pub fn export_filename(class_name: &str) -> String {
    let slug: String = class_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "gradebook.csv".to_string()
    } else {
        format!("gradebook-{}.csv", slug)
    }
}

/// Attendance counts for a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub excused: u32,
}

impl AttendanceSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            match record.status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Absent => summary.absent += 1,
                AttendanceStatus::Late => summary.late += 1,
                AttendanceStatus::Excused => summary.excused += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> u32 {
        self.present + self.absent + self.late + self.excused
    }

    /// Share of present or late records, as a percentage.
    pub fn rate(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            None
        } else {
            Some((self.present + self.late) as f64 / total as f64 * 100.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ClassId, SchoolId, UserId};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    fn sample() -> Gradebook {
        let class = Class::new(SchoolId::new(), UserId::new(), "Grade 7 Math");
        let ada = Student::new(class.id, "Ada Lovelace", "07-001");
        let alan = Student::new(class.id, "Turing, Alan", "07-002");
        let quiz = Assignment::new(class.id, "Quiz 1", date(10), 10.0);
        let essay = Assignment::new(class.id, "Essay \"Numbers\"", date(20), 100.0);

        let grades = vec![
            Grade::new(quiz.id, ada.id, Some(8.0)),
            Grade::new(essay.id, ada.id, Some(91.5)),
            Grade::new(quiz.id, alan.id, None),
        ];

        Gradebook {
            class: Some(class),
            students: vec![ada, alan],
            assignments: vec![quiz, essay],
            grades,
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_student() {
        let csv = export_csv(&sample());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Student Name,Roll Number,Quiz 1,\"Essay \"\"Numbers\"\"\",Average"
        );
        assert_eq!(lines[1], "Ada Lovelace,07-001,8,91.5,49.75");
        assert_eq!(lines[2], "\"Turing, Alan\",07-002,N/A,N/A,N/A");
    }

    #[test]
    fn empty_gradebook_exports_header_only() {
        let csv = export_csv(&Gradebook::default());
        assert_eq!(csv, "Student Name,Roll Number,Average\n");
    }

    #[test]
    fn averages_ignore_unmarked_work() {
        let gradebook = sample();
        let ada = gradebook.students[0].id;
        let alan = gradebook.students[1].id;
        let quiz = gradebook.assignments[0].id;

        assert_eq!(gradebook.student_average(ada), Some(49.75));
        assert_eq!(gradebook.student_average(alan), None);
        assert_eq!(gradebook.assignment_average(quiz), Some(8.0));
        assert_eq!(gradebook.score(ada, quiz), Some(8.0));
    }

    #[test]
    fn filename_is_slugged() {
        assert_eq!(export_filename("Grade 7 Math"), "gradebook-grade-7-math.csv");
        assert_eq!(export_filename("  "), "gradebook.csv");
        assert_eq!(export_filename("A/B -- C"), "gradebook-a-b-c.csv");
    }

    #[test]
    fn attendance_rate_counts_late_as_attended() {
        let class = ClassId::new();
        let student = crate::ids::StudentId::new();
        let records = vec![
            AttendanceRecord::new(class, student, date(1), AttendanceStatus::Present),
            AttendanceRecord::new(class, student, date(2), AttendanceStatus::Late),
            AttendanceRecord::new(class, student, date(3), AttendanceStatus::Absent),
            AttendanceRecord::new(class, student, date(4), AttendanceStatus::Excused),
        ];

        let summary = AttendanceSummary::from_records(&records);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.rate(), Some(50.0));
        assert_eq!(AttendanceSummary::default().rate(), None);
    }
}
