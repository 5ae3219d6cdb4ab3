//! Teacher operations: classes, students, assignments, gradebook and attendance.

use std::collections::HashSet;

use chrono::NaiveDate;
use db::Repository;
use school_core::{
    ApiResult, Assignment, AssignmentId, AssignmentInput, AttendanceInput, AttendanceRecord,
    AttendanceSummary, Class, ClassId, Grade, GradeInput, Gradebook, ListParams, Paginated, Student,
    UserId, format_number,
};

use crate::admin::AdminApi;
use crate::error::{ServiceError, ServiceResult, require};

impl<R: Repository> AdminApi<R> {
    /// Classes, optionally limited to one teacher.
    pub async fn get_classes(
        &self,
        params: ListParams,
        teacher_id: Option<UserId>,
    ) -> ApiResult<Paginated<Class>> {
        self.call("get_classes", async {
            Ok(self
                .list_records::<Class, _>(&params, |c| teacher_id.is_none_or(|id| c.teacher_id == id))
                .await)
        })
        .await
    }

    pub async fn get_students(&self, class_id: ClassId, params: ListParams) -> ApiResult<Paginated<Student>> {
        self.call("get_students", async {
            Ok(self
                .list_records::<Student, _>(&params, |s| s.class_id == class_id)
                .await)
        })
        .await
    }

    pub async fn get_assignments(
        &self,
        class_id: ClassId,
        params: ListParams,
    ) -> ApiResult<Paginated<Assignment>> {
        self.call("get_assignments", async {
            Ok(self
                .list_records::<Assignment, _>(&params, |a| a.class_id == class_id)
                .await)
        })
        .await
    }

    pub async fn create_assignment(&self, input: AssignmentInput) -> ApiResult<Assignment> {
        self.call("create_assignment", async {
            let (class_id, due_date, max_score) = self.validate_assignment(&input).await?;

            let assignment = Assignment::new(class_id, input.title.trim(), due_date, max_score)
                .with_description(input.description.trim());

            let assignment = self.repo.insert(&assignment).await?;
            self.audit(
                "assignment.create",
                "assignment",
                assignment.id,
                format!("Created assignment {}", assignment.title),
            )
            .await;
            Ok(assignment)
        })
        .await
    }

    pub async fn update_assignment(
        &self,
        id: AssignmentId,
        input: AssignmentInput,
    ) -> ApiResult<Assignment> {
        self.call("update_assignment", async {
            let mut assignment = self.fetch::<Assignment>(id, "Assignment").await?;
            let (class_id, due_date, max_score) = self.validate_assignment(&input).await?;

            if max_score < assignment.max_score {
                let grades = self.repo.find::<Grade, _>(|g| g.assignment_id == id).await?;
                if let Some(top) = grades.iter().filter_map(|g| g.score).reduce(f64::max)
                    && top > max_score
                {
                    return Err(ServiceError::validation(format!(
                        "Max score cannot be below an existing score of {}",
                        format_number(top)
                    )));
                }
            }

            assignment.class_id = class_id;
            assignment.title = input.title.trim().to_string();
            assignment.description = input.description.trim().to_string();
            assignment.due_date = due_date;
            assignment.max_score = max_score;

            let assignment = self.repo.update(&assignment).await?;
            self.audit(
                "assignment.update",
                "assignment",
                assignment.id,
                format!("Updated assignment {}", assignment.title),
            )
            .await;
            Ok(assignment)
        })
        .await
    }

    /// Delete an assignment and every grade recorded against it.
    pub async fn delete_assignment(&self, id: AssignmentId) -> ApiResult<()> {
        self.call("delete_assignment", async {
            let assignment = self.fetch::<Assignment>(id, "Assignment").await?;

            let grades = self.repo.find::<Grade, _>(|g| g.assignment_id == id).await?;
            for grade in &grades {
                self.repo.delete::<Grade>(&grade.id.to_string()).await?;
            }
            self.repo.delete::<Assignment>(&id.to_string()).await?;

            self.audit(
                "assignment.delete",
                "assignment",
                id,
                format!("Deleted assignment {} and {} grades", assignment.title, grades.len()),
            )
            .await;
            Ok(())
        })
        .await
    }

    async fn validate_assignment(
        &self,
        input: &AssignmentInput,
    ) -> ServiceResult<(ClassId, NaiveDate, f64)> {
        let class_id = input
            .class_id
            .ok_or_else(|| ServiceError::validation("Class is required"))?;
        require(&input.title, "Title is required")?;
        let due_date = input
            .due_date
            .ok_or_else(|| ServiceError::validation("Due date is required"))?;
        let max_score = input
            .max_score
            .ok_or_else(|| ServiceError::validation("Max score is required"))?;
        if !max_score.is_finite() || max_score <= 0.0 {
            return Err(ServiceError::validation("Max score must be greater than zero"));
        }

        self.fetch::<Class>(class_id, "Class").await?;
        Ok((class_id, due_date, max_score))
    }

    /// Students, assignments and grades of a class, in insertion order.
    pub async fn get_gradebook(&self, class_id: ClassId) -> ApiResult<Gradebook> {
        self.call("get_gradebook", async {
            let class = self.fetch::<Class>(class_id, "Class").await?;
            let students = self.repo.find::<Student, _>(|s| s.class_id == class_id).await?;
            let assignments = self.repo.find::<Assignment, _>(|a| a.class_id == class_id).await?;

            let assignment_ids: Vec<AssignmentId> = assignments.iter().map(|a| a.id).collect();
            let grades = self
                .repo
                .find::<Grade, _>(|g| assignment_ids.contains(&g.assignment_id))
                .await?;

            Ok(Gradebook {
                class: Some(class),
                students,
                assignments,
                grades,
            })
        })
        .await
    }

    /// Set or clear one student's score on one assignment.
    pub async fn record_grade(&self, input: GradeInput) -> ApiResult<Grade> {
        self.call("record_grade", async {
            let assignment = self.fetch::<Assignment>(input.assignment_id, "Assignment").await?;
            let student = self.fetch::<Student>(input.student_id, "Student").await?;
            if student.class_id != assignment.class_id {
                return Err(ServiceError::validation("Student is not enrolled in this class"));
            }

            if let Some(score) = input.score
                && !(score.is_finite() && (0.0..=assignment.max_score).contains(&score))
            {
                return Err(ServiceError::validation(format!(
                    "Score must be between 0 and {}",
                    format_number(assignment.max_score)
                )));
            }

            let existing = self
                .repo
                .find::<Grade, _>(|g| {
                    g.assignment_id == input.assignment_id && g.student_id == input.student_id
                })
                .await?;

            let grade = match existing.into_iter().next() {
                Some(mut grade) => {
                    grade.score = input.score;
                    self.repo.update(&grade).await?
                }
                None => {
                    let grade = Grade::new(input.assignment_id, input.student_id, input.score);
                    self.repo.insert(&grade).await?
                }
            };

            let shown = grade.score.map(format_number).unwrap_or_else(|| "N/A".to_string());
            self.audit(
                "grade.record",
                "grade",
                grade.id,
                format!("{} scored {} on {}", student.name, shown, assignment.title),
            )
            .await;
            Ok(grade)
        })
        .await
    }

    /// Attendance of a class on one day.
    pub async fn get_attendance(&self, class_id: ClassId, date: NaiveDate) -> ApiResult<Vec<AttendanceRecord>> {
        self.call("get_attendance", async {
            self.fetch::<Class>(class_id, "Class").await?;
            Ok(self
                .repo
                .find::<AttendanceRecord, _>(|r| r.class_id == class_id && r.date == date)
                .await?)
        })
        .await
    }

    /// Attendance totals of a class over every recorded day.
    pub async fn get_attendance_summary(&self, class_id: ClassId) -> ApiResult<AttendanceSummary> {
        self.call("get_attendance_summary", async {
            self.fetch::<Class>(class_id, "Class").await?;
            let records = self
                .repo
                .find::<AttendanceRecord, _>(|r| r.class_id == class_id)
                .await?;
            Ok(AttendanceSummary::from_records(&records))
        })
        .await
    }

    /// Record attendance for a class on one day, one entry per student.
    /// A student listed twice is rejected. Existing marks for the same
    /// student and day are overwritten.
    pub async fn mark_attendance(&self, input: AttendanceInput) -> ApiResult<Vec<AttendanceRecord>> {
        self.call("mark_attendance", async {
            let class = self.fetch::<Class>(input.class_id, "Class").await?;
            if input.entries.is_empty() {
                return Err(ServiceError::validation("No attendance entries given"));
            }

            let mut seen = HashSet::with_capacity(input.entries.len());
            if let Some(repeated) = input.entries.iter().find(|e| !seen.insert(e.student_id)) {
                return Err(ServiceError::validation(format!(
                    "Student {} is listed more than once",
                    repeated.student_id
                )));
            }

            let class_id = class.id;
            let roster = self.repo.find::<Student, _>(|s| s.class_id == class_id).await?;
            if let Some(stranger) = input
                .entries
                .iter()
                .find(|e| !roster.iter().any(|s| s.id == e.student_id))
            {
                return Err(ServiceError::validation(format!(
                    "Student {} is not enrolled in {}",
                    stranger.student_id, class.name
                )));
            }

            let date = input.date;
            let existing = self
                .repo
                .find::<AttendanceRecord, _>(|r| r.class_id == class_id && r.date == date)
                .await?;

            let mut saved = Vec::with_capacity(input.entries.len());
            for entry in &input.entries {
                let record = match existing.iter().find(|r| r.student_id == entry.student_id) {
                    Some(record) => {
                        let mut record = record.clone();
                        record.status = entry.status;
                        self.repo.update(&record).await?
                    }
                    None => {
                        let record = AttendanceRecord::new(class_id, entry.student_id, date, entry.status);
                        self.repo.insert(&record).await?
                    }
                };
                saved.push(record);
            }

            self.audit(
                "attendance.mark",
                "class",
                class_id,
                format!("Marked {} students for {}", saved.len(), date),
            )
            .await;
            Ok(saved)
        })
        .await
    }
}
