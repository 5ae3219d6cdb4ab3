#![allow(clippy::disallowed_methods)]

mod common;

use std::error::Error;

use chrono::NaiveDate;
use db::Repository;
use school_core::gradebook::export_csv;
use school_core::{
    AssignmentInput, AttendanceEntry, AttendanceInput, AttendanceStatus, Class, GradeInput,
    ListParams, SchoolStatus, Student, TermInput, TicketInput, TicketPriority, TicketStatus, UserId,
};

use common::{add_school, api, seeded_api};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn test_terms_validate_dates_and_overlap() -> Result<(), Box<dyn Error>> {
    let api = api();
    let school = add_school(&api, "Juniper", SchoolStatus::Active).await;

    let term = |name: &str, start, end| TermInput {
        school_id: Some(school.id),
        name: name.to_string(),
        start_date: Some(start),
        end_date: Some(end),
        is_current: None,
    };

    let backwards = api.create_term(term("Backwards", day(2025, 6, 1), day(2025, 1, 1))).await.err();
    assert_eq!(backwards.map(|e| e.status), Some(400));

    let autumn = api.create_term(term("Autumn", day(2025, 9, 1), day(2025, 12, 19))).await?;
    let spring = api.create_term(term("Spring", day(2026, 1, 5), day(2026, 3, 27))).await?;

    let clash = api.create_term(term("Clash", day(2025, 12, 1), day(2026, 1, 10))).await.err();
    assert_eq!(clash.map(|e| e.status), Some(409));

    // Editing a term in place does not clash with itself.
    let longer = api.update_term(autumn.id, term("Autumn", day(2025, 8, 25), day(2025, 12, 19))).await?;
    assert_eq!(longer.start_date, day(2025, 8, 25));

    api.set_current_term(autumn.id).await?;
    api.set_current_term(spring.id).await?;
    let terms = api.get_terms(ListParams::new(), Some(school.id)).await?;
    let current: Vec<_> = terms.items.iter().filter(|t| t.is_current).map(|t| t.id).collect();
    assert_eq!(current, vec![spring.id]);

    api.delete_term(autumn.id).await?;
    let terms = api.get_terms(ListParams::new(), Some(school.id)).await?;
    assert_eq!(terms.meta.total_items, 1);
    Ok(())
}

async fn first_class(api: &services::AdminApi<db::MemoryRepository>, teacher: Option<UserId>) -> Class {
    let classes = api.get_classes(ListParams::new(), teacher).await;
    match classes.ok().and_then(|page| page.items.into_iter().next()) {
        Some(class) => class,
        None => panic!("demo data has no classes"),
    }
}

#[tokio::test]
async fn test_gradebook_and_grade_upsert() -> Result<(), Box<dyn Error>> {
    let api = seeded_api().await?;
    let teacher = api
        .repository()
        .find::<school_core::User, _>(|u| u.role == school_core::Role::Teacher)
        .await?
        .first()
        .map(|u| u.id);
    let class = first_class(&api, teacher).await;

    let book = api.get_gradebook(class.id).await?;
    assert_eq!(book.students.len(), 6);
    assert_eq!(book.assignments.len(), 3);

    let quiz = &book.assignments[0];
    let student = &book.students[2];
    assert_eq!(book.score(student.id, quiz.id), Some(20.0));

    let too_high = GradeInput {
        assignment_id: quiz.id,
        student_id: student.id,
        score: Some(quiz.max_score + 1.0),
    };
    assert_eq!(api.record_grade(too_high).await.err().map(|e| e.status), Some(400));

    let fixed = GradeInput {
        assignment_id: quiz.id,
        student_id: student.id,
        score: Some(16.5),
    };
    api.record_grade(fixed).await?;

    let book = api.get_gradebook(class.id).await?;
    assert_eq!(book.score(student.id, quiz.id), Some(16.5));
    let quiz_grades = book
        .grades
        .iter()
        .filter(|g| g.assignment_id == quiz.id && g.student_id == student.id)
        .count();
    assert_eq!(quiz_grades, 1);

    let csv = export_csv(&book);
    let header = csv.lines().next().unwrap_or_default();
    assert!(header.starts_with("Student Name,Roll Number,Fractions Quiz"));
    assert!(header.ends_with(",Average"));
    assert_eq!(csv.lines().count(), 7);
    Ok(())
}

#[tokio::test]
async fn test_grades_reject_students_from_other_classes() -> Result<(), Box<dyn Error>> {
    let api = seeded_api().await?;
    let book = api.get_gradebook(first_class(&api, None).await.id).await?;

    let outsider = Student::new(school_core::ClassId::new(), "Visitor", "X-01");
    api.repository().insert(&outsider).await?;

    let input = GradeInput {
        assignment_id: book.assignments[0].id,
        student_id: outsider.id,
        score: Some(1.0),
    };
    assert_eq!(api.record_grade(input).await.err().map(|e| e.status), Some(400));
    Ok(())
}

#[tokio::test]
async fn test_assignment_lifecycle_removes_grades() -> Result<(), Box<dyn Error>> {
    let api = seeded_api().await?;
    let class = first_class(&api, None).await;

    let missing_title = AssignmentInput {
        class_id: Some(class.id),
        due_date: Some(day(2026, 5, 1)),
        max_score: Some(10.0),
        ..Default::default()
    };
    assert_eq!(api.create_assignment(missing_title.clone()).await.err().map(|e| e.status), Some(400));

    let essay = api
        .create_assignment(AssignmentInput {
            title: "Essay".into(),
            ..missing_title
        })
        .await?;
    let students = api.get_students(class.id, ListParams::new()).await?;
    let student = &students.items[0];
    api.record_grade(GradeInput {
        assignment_id: essay.id,
        student_id: student.id,
        score: Some(8.0),
    })
    .await?;

    let assignments = api.get_assignments(class.id, ListParams::new().with_search("essay")).await?;
    assert_eq!(assignments.meta.total_items, 1);

    api.delete_assignment(essay.id).await?;
    let book = api.get_gradebook(class.id).await?;
    assert!(book.assignments.iter().all(|a| a.id != essay.id));
    let leftover = api
        .repository()
        .find::<school_core::Grade, _>(|g| g.assignment_id == essay.id)
        .await?;
    assert!(leftover.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_attendance_is_upserted_per_student_and_day() -> Result<(), Box<dyn Error>> {
    let api = seeded_api().await?;
    let class = first_class(&api, None).await;
    let roster = api.get_students(class.id, ListParams::new().with_limit(100)).await?.items;
    let date = day(2026, 2, 2);

    let mark = |status| AttendanceInput {
        class_id: class.id,
        date,
        entries: roster
            .iter()
            .map(|s| AttendanceEntry {
                student_id: s.id,
                status,
            })
            .collect(),
    };

    api.mark_attendance(mark(AttendanceStatus::Present)).await?;
    api.mark_attendance(mark(AttendanceStatus::Late)).await?;

    let records = api.get_attendance(class.id, date).await?;
    assert_eq!(records.len(), roster.len());
    assert!(records.iter().all(|r| r.status == AttendanceStatus::Late));

    let empty = AttendanceInput {
        class_id: class.id,
        date,
        entries: Vec::new(),
    };
    assert_eq!(api.mark_attendance(empty).await.err().map(|e| e.status), Some(400));

    let summary = api.get_attendance_summary(class.id).await?;
    assert!(summary.total() >= roster.len() as u32);
    Ok(())
}

#[tokio::test]
async fn test_attendance_rejects_a_student_listed_twice() -> Result<(), Box<dyn Error>> {
    let api = seeded_api().await?;
    let class = first_class(&api, None).await;
    let student = api.get_students(class.id, ListParams::new()).await?.items[0].clone();
    let date = day(2026, 3, 9);

    let doubled = AttendanceInput {
        class_id: class.id,
        date,
        entries: vec![
            AttendanceEntry {
                student_id: student.id,
                status: AttendanceStatus::Present,
            },
            AttendanceEntry {
                student_id: student.id,
                status: AttendanceStatus::Absent,
            },
        ],
    };
    assert_eq!(api.mark_attendance(doubled).await.err().map(|e| e.status), Some(400));

    let records = api.get_attendance(class.id, date).await?;
    assert_eq!(records.iter().filter(|r| r.student_id == student.id).count(), 0);

    let single = AttendanceInput {
        class_id: class.id,
        date,
        entries: vec![AttendanceEntry {
            student_id: student.id,
            status: AttendanceStatus::Absent,
        }],
    };
    api.mark_attendance(single.clone()).await?;
    api.mark_attendance(single).await?;
    let records = api.get_attendance(class.id, date).await?;
    assert_eq!(records.iter().filter(|r| r.student_id == student.id).count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_ticket_flow_and_school_overview() -> Result<(), Box<dyn Error>> {
    let api = api();
    let school = add_school(&api, "Sycamore", SchoolStatus::Active).await;

    let no_subject = TicketInput {
        school_id: Some(school.id),
        ..Default::default()
    };
    assert_eq!(api.create_ticket(no_subject).await.err().map(|e| e.status), Some(400));

    let ticket = api
        .create_ticket(TicketInput {
            school_id: Some(school.id),
            subject: "Cannot log in".into(),
            description: "Password reset mail never arrives".into(),
            priority: Some(TicketPriority::High),
            category: None,
        })
        .await?;
    assert_eq!(ticket.status, TicketStatus::Open);

    let overview = api.get_school_overview(school.id).await?;
    assert_eq!(overview.open_tickets.len(), 1);

    let resolved = api.update_ticket_status(ticket.id, TicketStatus::Resolved).await?;
    assert!(resolved.updated_at >= ticket.updated_at);

    let overview = api.get_school_overview(school.id).await?;
    assert!(overview.open_tickets.is_empty());

    let open = api
        .get_tickets(ListParams::new().with_filter("status", "open"), Some(school.id))
        .await?;
    assert_eq!(open.meta.total_items, 0);
    let high = api
        .get_tickets(ListParams::new().with_filter("priority", "high"), None)
        .await?;
    assert_eq!(high.meta.total_items, 1);
    Ok(())
}
