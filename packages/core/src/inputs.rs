//! Request payloads for create/update operations and aggregate views.
//!
//! Free-text fields are plain strings straight from form controls; required
//! fields are checked by the admin API, not here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::academic::AttendanceStatus;
use crate::ids::{AssignmentId, BranchId, ClassId, PlanId, SchoolId, StudentId};
use crate::role::Role;
use crate::school::{BillingCycle, Branch, BranchStatus, Plan, PlanLimits, School, SchoolStatus};
use crate::support::{SupportTicket, TicketCategory, TicketPriority};
use crate::user::UserStatus;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchoolInput {
    pub name: String,
    pub location: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub status: Option<SchoolStatus>,
    pub plan_id: Option<PlanId>,
    pub students: Option<u32>,
}

impl From<&School> for SchoolInput {
    fn from(school: &School) -> Self {
        Self {
            name: school.name.clone(),
            location: school.location.clone(),
            contact_email: school.contact_email.clone(),
            contact_phone: school.contact_phone.clone(),
            status: Some(school.status),
            plan_id: school.plan_id,
            students: Some(school.students),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchInput {
    pub school_id: Option<SchoolId>,
    pub name: String,
    pub location: String,
    pub students: Option<u32>,
    pub status: Option<BranchStatus>,
}

impl From<&Branch> for BranchInput {
    fn from(branch: &Branch) -> Self {
        Self {
            school_id: Some(branch.school_id),
            name: branch.name.clone(),
            location: branch.location.clone(),
            students: Some(branch.students),
            status: Some(branch.status),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
    pub school_id: Option<SchoolId>,
    pub branch_id: Option<BranchId>,
    pub status: Option<UserStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanInput {
    pub name: String,
    pub price: Option<f64>,
    pub billing_cycle: Option<BillingCycle>,
    pub limits: Option<PlanLimits>,
    pub features: Vec<String>,
    pub is_active: Option<bool>,
}

impl From<&Plan> for PlanInput {
    fn from(plan: &Plan) -> Self {
        Self {
            name: plan.name.clone(),
            price: Some(plan.price),
            billing_cycle: Some(plan.billing_cycle),
            limits: Some(plan.limits.clone()),
            features: plan.features.clone(),
            is_active: Some(plan.is_active),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketInput {
    pub school_id: Option<SchoolId>,
    pub subject: String,
    pub description: String,
    pub priority: Option<TicketPriority>,
    pub category: Option<TicketCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermInput {
    pub school_id: Option<SchoolId>,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_current: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentInput {
    pub class_id: Option<ClassId>,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub max_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeInput {
    pub assignment_id: AssignmentId,
    pub student_id: StudentId,
    /// `None` clears a previously entered score.
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub student_id: StudentId,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceInput {
    pub class_id: ClassId,
    pub date: NaiveDate,
    pub entries: Vec<AttendanceEntry>,
}

/// Platform-wide counters for the super admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformStats {
    pub total_schools: usize,
    pub active_schools: usize,
    pub pending_schools: usize,
    pub suspended_schools: usize,
    pub total_branches: usize,
    pub total_users: usize,
    pub total_students: u64,
    pub active_plans: usize,
    pub open_tickets: usize,
    /// Recurring revenue of active schools, normalised to one month.
    pub monthly_revenue: f64,
}

/// Everything support staff need to see about one school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolOverview {
    pub school: School,
    pub branches: Vec<Branch>,
    pub plan: Option<Plan>,
    pub open_tickets: Vec<SupportTicket>,
}
