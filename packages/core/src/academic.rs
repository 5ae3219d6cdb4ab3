//! Academic records: terms, classes, students, assignments, grades and attendance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{AssignmentId, AttendanceId, ClassId, GradeId, SchoolId, StudentId, TermId, UserId};
use crate::record::{Entity, FieldValue, Record};

/// An academic term within a school year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub school_id: SchoolId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_current: bool,
}

impl Term {
    pub fn new(school_id: SchoolId, name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: TermId::new(),
            school_id,
            name: name.into(),
            start_date,
            end_date,
            is_current: false,
        }
    }

    /// Whether `date` falls inside the term, both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl Record for Term {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.to_string().into()),
            "school_id" => Some(self.school_id.to_string().into()),
            "name" => Some(self.name.as_str().into()),
            "start_date" => Some(self.start_date.into()),
            "end_date" => Some(self.end_date.into()),
            "is_current" => Some(self.is_current.into()),
            _ => None,
        }
    }
}

impl Entity for Term {
    const TABLE: &'static str = "term";
    const SEARCH_FIELDS: &'static [&'static str] = &["name"];

    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// A class (section) taught by one teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub school_id: SchoolId,
    pub teacher_id: UserId,
    pub name: String,
    #[serde(default)]
    pub grade_level: String,
}

impl Class {
    pub fn new(school_id: SchoolId, teacher_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id: ClassId::new(),
            school_id,
            teacher_id,
            name: name.into(),
            grade_level: String::new(),
        }
    }

    pub fn with_grade_level(mut self, grade_level: impl Into<String>) -> Self {
        self.grade_level = grade_level.into();
        self
    }
}

impl Record for Class {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.to_string().into()),
            "school_id" => Some(self.school_id.to_string().into()),
            "teacher_id" => Some(self.teacher_id.to_string().into()),
            "name" => Some(self.name.as_str().into()),
            "grade_level" => Some(self.grade_level.as_str().into()),
            _ => None,
        }
    }
}

impl Entity for Class {
    const TABLE: &'static str = "class";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "grade_level"];

    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// A student enrolled in a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub class_id: ClassId,
    pub name: String,
    pub roll_number: String,
}

impl Student {
    pub fn new(class_id: ClassId, name: impl Into<String>, roll_number: impl Into<String>) -> Self {
        Self {
            id: StudentId::new(),
            class_id,
            name: name.into(),
            roll_number: roll_number.into(),
        }
    }
}

impl Record for Student {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.to_string().into()),
            "class_id" => Some(self.class_id.to_string().into()),
            "name" => Some(self.name.as_str().into()),
            "roll_number" => Some(self.roll_number.as_str().into()),
            _ => None,
        }
    }
}

impl Entity for Student {
    const TABLE: &'static str = "student";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "roll_number"];

    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// Graded work set for a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub class_id: ClassId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    pub max_score: f64,
}

impl Assignment {
    pub fn new(class_id: ClassId, title: impl Into<String>, due_date: NaiveDate, max_score: f64) -> Self {
        Self {
            id: AssignmentId::new(),
            class_id,
            title: title.into(),
            description: String::new(),
            due_date,
            max_score,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Record for Assignment {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.to_string().into()),
            "class_id" => Some(self.class_id.to_string().into()),
            "title" => Some(self.title.as_str().into()),
            "description" => Some(self.description.as_str().into()),
            "due_date" => Some(self.due_date.into()),
            "max_score" => Some(self.max_score.into()),
            _ => None,
        }
    }
}

impl Entity for Assignment {
    const TABLE: &'static str = "assignment";
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "description"];

    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// A student's score on one assignment. `score` is `None` until marked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: GradeId,
    pub assignment_id: AssignmentId,
    pub student_id: StudentId,
    #[serde(default)]
    pub score: Option<f64>,
}

impl Grade {
    pub fn new(assignment_id: AssignmentId, student_id: StudentId, score: Option<f64>) -> Self {
        Self {
            id: GradeId::new(),
            assignment_id,
            student_id,
            score,
        }
    }
}

impl Record for Grade {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.to_string().into()),
            "assignment_id" => Some(self.assignment_id.to_string().into()),
            "student_id" => Some(self.student_id.to_string().into()),
            "score" => self.score.map(FieldValue::from),
            _ => None,
        }
    }
}

impl Entity for Grade {
    const TABLE: &'static str = "grade";
    const SEARCH_FIELDS: &'static [&'static str] = &[];

    fn key(&self) -> String {
        self.id.to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::Excused,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    /// Counts towards the attendance rate.
    pub fn is_attended(self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }
}

/// Attendance of one student on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub class_id: ClassId,
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn new(class_id: ClassId, student_id: StudentId, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            id: AttendanceId::new(),
            class_id,
            student_id,
            date,
            status,
        }
    }
}

impl Record for AttendanceRecord {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.to_string().into()),
            "class_id" => Some(self.class_id.to_string().into()),
            "student_id" => Some(self.student_id.to_string().into()),
            "date" => Some(self.date.into()),
            "status" => Some(self.status.as_str().into()),
            _ => None,
        }
    }
}

impl Entity for AttendanceRecord {
    const TABLE: &'static str = "attendance";
    const SEARCH_FIELDS: &'static [&'static str] = &[];

    fn key(&self) -> String {
        self.id.to_string()
    }
}
