//! Teacher server functions: classes, assignments, grades and attendance.

use chrono::NaiveDate;
use dioxus::prelude::*;
use school_core::{
    ApiResult, Assignment, AssignmentId, AssignmentInput, AttendanceInput, AttendanceRecord,
    AttendanceSummary, Class, ClassId, Grade, GradeInput, Gradebook, ListParams, Paginated, Student,
    UserId,
};

#[post("/api/classes/list")]
pub async fn get_classes(params: ListParams, teacher_id: Option<UserId>) -> Result<ApiResult<Paginated<Class>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_classes(params, teacher_id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/classes/students")]
pub async fn get_students(class_id: ClassId, params: ListParams) -> Result<ApiResult<Paginated<Student>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_students(class_id, params).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/assignments/list")]
pub async fn get_assignments(class_id: ClassId, params: ListParams) -> Result<ApiResult<Paginated<Assignment>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_assignments(class_id, params).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/assignments/create")]
pub async fn create_assignment(input: AssignmentInput) -> Result<ApiResult<Assignment>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.create_assignment(input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/assignments/update")]
pub async fn update_assignment(id: AssignmentId, input: AssignmentInput) -> Result<ApiResult<Assignment>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.update_assignment(id, input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Delete an assignment and its grades.
#[post("/api/assignments/delete")]
pub async fn delete_assignment(id: AssignmentId) -> Result<ApiResult<()>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.delete_assignment(id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/gradebook")]
pub async fn get_gradebook(class_id: ClassId) -> Result<ApiResult<Gradebook>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_gradebook(class_id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Set or clear one score.
#[post("/api/grades/record")]
pub async fn record_grade(input: GradeInput) -> Result<ApiResult<Grade>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.record_grade(input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/attendance/list")]
pub async fn get_attendance(class_id: ClassId, date: NaiveDate) -> Result<ApiResult<Vec<AttendanceRecord>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_attendance(class_id, date).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/attendance/summary")]
pub async fn get_attendance_summary(class_id: ClassId) -> Result<ApiResult<AttendanceSummary>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.get_attendance_summary(class_id).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[post("/api/attendance/mark")]
pub async fn mark_attendance(input: AttendanceInput) -> Result<ApiResult<Vec<AttendanceRecord>>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let api = crate::ensure_initialized().await?;
        Ok(api.mark_attendance(input).await)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}
