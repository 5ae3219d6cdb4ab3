//! Demo data loaded into an empty store at startup.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use db::{DbError, Repository};
use school_core::{
    Assignment, AttendanceRecord, AttendanceStatus, BillingCycle, Branch, BranchStatus, Class, Grade,
    Plan, PlanLimits, Role, School, SchoolStatus, Student, SupportTicket, Term, TicketCategory,
    TicketPriority, TicketStatus, User, UserId, UserStatus,
};

/// What the seeding step found or created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedSummary {
    /// Whether demo data was written in this call.
    pub seeded: bool,
    pub super_admin: Option<UserId>,
    pub teacher: Option<UserId>,
}

/// Load demo data unless the store already has schools.
pub async fn seed_demo_data<R: Repository>(repo: &R) -> Result<SeedSummary, DbError> {
    if repo.count::<School>().await? > 0 {
        let users = repo.list::<User>().await?;
        let first = |role: Role| users.iter().find(|u| u.role == role).map(|u| u.id);
        tracing::info!("Store already populated, skipping demo data");
        return Ok(SeedSummary {
            seeded: false,
            super_admin: first(Role::SuperAdmin),
            teacher: first(Role::Teacher),
        });
    }

    tracing::info!("Seeding demo data...");

    let basic = Plan::new("Basic", 49.0, BillingCycle::Monthly)
        .with_limits(PlanLimits {
            max_students: 300,
            max_branches: 1,
            storage_gb: 5,
        })
        .with_features(vec!["Gradebook".into(), "Attendance".into()]);
    let standard = Plan::new("Standard", 129.0, BillingCycle::Monthly)
        .with_limits(PlanLimits {
            max_students: 1500,
            max_branches: 3,
            storage_gb: 25,
        })
        .with_features(vec!["Gradebook".into(), "Attendance".into(), "Parent portal".into()]);
    let enterprise = Plan::new("Enterprise", 2990.0, BillingCycle::Yearly)
        .with_limits(PlanLimits {
            max_students: 10_000,
            max_branches: 25,
            storage_gb: 250,
        })
        .with_features(vec![
            "Gradebook".into(),
            "Attendance".into(),
            "Parent portal".into(),
            "Priority support".into(),
        ]);
    let mut legacy = Plan::new("Legacy", 29.0, BillingCycle::Monthly);
    legacy.is_active = false;

    for plan in [&basic, &standard, &enterprise, &legacy] {
        repo.insert(plan).await?;
    }

    let mut schools = [
        School::new("Greenwood High", "Springfield")
            .with_status(SchoolStatus::Active)
            .with_contact("office@greenwood.edu", "555-0101")
            .with_plan(standard.id)
            .with_students(1240),
        School::new("Riverside Academy", "Riverton")
            .with_status(SchoolStatus::Active)
            .with_contact("admin@riverside.edu", "555-0102")
            .with_plan(enterprise.id)
            .with_students(3820),
        School::new("Hillcrest Primary", "Oakdale")
            .with_status(SchoolStatus::Pending)
            .with_contact("hello@hillcrest.edu", "555-0103")
            .with_plan(basic.id)
            .with_students(210),
        School::new("Lakeside International", "Bayview")
            .with_status(SchoolStatus::Suspended)
            .with_contact("info@lakeside.edu", "555-0104")
            .with_plan(standard.id)
            .with_students(640),
        School::new("Maple Leaf School", "Northfield")
            .with_status(SchoolStatus::Active)
            .with_contact("contact@mapleleaf.edu", "555-0105")
            .with_plan(basic.id)
            .with_students(180),
    ];
    let [greenwood, riverside, hillcrest, lakeside, _] = &schools;

    let greenwood_main = Branch::new(greenwood.id, "Main Campus", "Springfield").with_students(900);
    let greenwood_east = Branch::new(greenwood.id, "East Campus", "Shelbyville").with_students(340);
    let mut riverside_online = Branch::new(riverside.id, "Online", "Remote").with_students(1000);
    riverside_online.status = BranchStatus::Inactive;

    let branches = [
        greenwood_main.clone(),
        greenwood_east.clone(),
        Branch::new(riverside.id, "North Campus", "Riverton").with_students(1500),
        Branch::new(riverside.id, "South Campus", "Riverton").with_students(1320),
        riverside_online,
        Branch::new(hillcrest.id, "Main Campus", "Oakdale").with_students(210),
        Branch::new(lakeside.id, "Main Campus", "Bayview").with_students(640),
    ];

    for school in schools.iter_mut() {
        let count = branches.iter().filter(|b| b.school_id == school.id).count();
        school.branches = count as u32;
        repo.insert(&*school).await?;
    }
    for branch in &branches {
        repo.insert(branch).await?;
    }
    let [greenwood, riverside, _, lakeside, _] = &schools;

    let super_admin = User::new("Avery Quinn", "avery@platform.io", Role::SuperAdmin);
    let support = User::new("Jordan Lee", "jordan@platform.io", Role::SupportAdmin);
    let principal = User::new("Morgan Hale", "m.hale@greenwood.edu", Role::SchoolAdmin).in_school(greenwood.id);
    let branch_admin = User::new("Casey Ford", "c.ford@greenwood.edu", Role::BranchAdmin)
        .in_school(greenwood.id)
        .in_branch(greenwood_east.id);
    let teacher = User::new("Riley Park", "r.park@greenwood.edu", Role::Teacher)
        .in_school(greenwood.id)
        .in_branch(greenwood_main.id);
    let second_teacher = User::new("Sam Ortiz", "s.ortiz@riverside.edu", Role::Teacher).in_school(riverside.id);
    let mut suspended = User::new("Drew Patel", "d.patel@lakeside.edu", Role::SchoolAdmin).in_school(lakeside.id);
    suspended.status = UserStatus::Suspended;

    for user in [
        &super_admin,
        &support,
        &principal,
        &branch_admin,
        &teacher,
        &second_teacher,
        &suspended,
    ] {
        repo.insert(user).await?;
    }

    let tickets = [
        SupportTicket::new(greenwood.id, "Gradebook export missing columns", "Averages are not shown in the CSV.")
            .with_priority(TicketPriority::High)
            .with_category(TicketCategory::Technical),
        SupportTicket::new(riverside.id, "Invoice for last quarter", "Please resend the Q3 invoice.")
            .with_category(TicketCategory::Billing),
        SupportTicket::new(lakeside.id, "Account suspended", "We paid, please restore access.")
            .with_priority(TicketPriority::Urgent)
            .with_category(TicketCategory::Account),
        SupportTicket::new(greenwood.id, "SMS reminders", "Could attendance alerts go out by SMS?")
            .with_priority(TicketPriority::Low)
            .with_category(TicketCategory::FeatureRequest),
    ];
    for (i, mut ticket) in tickets.into_iter().enumerate() {
        ticket.status = match i {
            1 => TicketStatus::InProgress,
            3 => TicketStatus::Resolved,
            _ => TicketStatus::Open,
        };
        repo.insert(&ticket).await?;
    }

    let today = Utc::now().date_naive();
    let year = today.year();
    let terms = [
        ("Autumn Term", date(year - 1, 9, 1), date(year - 1, 12, 20)),
        ("Spring Term", date(year, 1, 8), date(year, 4, 5)),
        ("Summer Term", date(year, 4, 22), date(year, 7, 19)),
    ];
    for (name, start, end) in terms {
        let (Some(start), Some(end)) = (start, end) else {
            continue;
        };
        let mut term = Term::new(greenwood.id, name, start, end);
        term.is_current = term.contains(today);
        repo.insert(&term).await?;
    }

    let math = Class::new(greenwood.id, teacher.id, "Mathematics 7A").with_grade_level("Grade 7");
    let science = Class::new(greenwood.id, teacher.id, "Science 7B").with_grade_level("Grade 7");
    let history = Class::new(riverside.id, second_teacher.id, "History 9").with_grade_level("Grade 9");
    for class in [&math, &science, &history] {
        repo.insert(class).await?;
    }

    let names = ["Alex Morgan", "Blake Chen", "Charlie Diaz", "Dana Kim", "Emery Stone", "Finley Ross"];
    let mut students = Vec::new();
    for (i, name) in names.iter().enumerate() {
        let student = Student::new(math.id, *name, format!("7A-{:02}", i + 1));
        repo.insert(&student).await?;
        students.push(student);
    }
    for (i, name) in ["Gray Wilson", "Harper Young", "Indy Lopez"].iter().enumerate() {
        repo.insert(&Student::new(science.id, *name, format!("7B-{:02}", i + 1))).await?;
    }

    let assignments = [
        Assignment::new(math.id, "Fractions Quiz", today - Duration::days(21), 20.0)
            .with_description("Adding and simplifying fractions"),
        Assignment::new(math.id, "Algebra Homework", today - Duration::days(7), 50.0),
        Assignment::new(math.id, "Geometry Project", today + Duration::days(14), 100.0)
            .with_description("Build a scale model, with a short write-up"),
    ];
    for assignment in &assignments {
        repo.insert(assignment).await?;
    }

    let scores: [[Option<f64>; 2]; 6] = [
        [Some(18.0), Some(45.0)],
        [Some(15.5), Some(38.0)],
        [Some(20.0), None],
        [Some(12.0), Some(41.0)],
        [None, Some(30.0)],
        [Some(17.0), Some(47.5)],
    ];
    for (student, row) in students.iter().zip(scores) {
        for (assignment, score) in assignments.iter().zip(row) {
            repo.insert(&Grade::new(assignment.id, student.id, score)).await?;
        }
    }

    let pattern = [
        AttendanceStatus::Present,
        AttendanceStatus::Present,
        AttendanceStatus::Late,
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Excused,
    ];
    for days_ago in 1..=3 {
        let day = today - Duration::days(days_ago);
        for (i, student) in students.iter().enumerate() {
            let status = pattern[(i + days_ago as usize) % pattern.len()];
            repo.insert(&AttendanceRecord::new(math.id, student.id, day, status)).await?;
        }
    }

    tracing::info!(
        schools = schools.len(),
        branches = branches.len(),
        students = students.len(),
        "Demo data seeded"
    );

    Ok(SeedSummary {
        seeded: true,
        super_admin: Some(super_admin.id),
        teacher: Some(teacher.id),
    })
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}
