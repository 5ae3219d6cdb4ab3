//! Schools, their branches, and billing plans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{BranchId, PlanId, SchoolId};
use crate::record::{Entity, FieldValue, Record};

/// Lifecycle status of a school tenant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchoolStatus {
    Active,
    #[default]
    Pending,
    Suspended,
}

impl SchoolStatus {
    pub const ALL: [SchoolStatus; 3] = [
        SchoolStatus::Active,
        SchoolStatus::Pending,
        SchoolStatus::Suspended,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SchoolStatus::Active => "active",
            SchoolStatus::Pending => "pending",
            SchoolStatus::Suspended => "suspended",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// Operational status of a branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchStatus {
    #[default]
    Active,
    Inactive,
}

impl BranchStatus {
    pub const ALL: [BranchStatus; 2] = [BranchStatus::Active, BranchStatus::Inactive];

    pub fn as_str(self) -> &'static str {
        match self {
            BranchStatus::Active => "active",
            BranchStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// A school on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub location: String,
    /// Number of branches, kept in step with the branch table.
    #[serde(default)]
    pub branches: u32,
    #[serde(default)]
    pub students: u32,
    pub status: SchoolStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<PlanId>,
}

impl School {
    /// Create a new pending school.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: SchoolId::new(),
            name: name.into(),
            location: location.into(),
            branches: 0,
            students: 0,
            status: SchoolStatus::Pending,
            created_at: Utc::now(),
            contact_email: String::new(),
            contact_phone: String::new(),
            plan_id: None,
        }
    }

    pub fn with_status(mut self, status: SchoolStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_contact(mut self, email: impl Into<String>, phone: impl Into<String>) -> Self {
        self.contact_email = email.into();
        self.contact_phone = phone.into();
        self
    }

    pub fn with_plan(mut self, plan_id: PlanId) -> Self {
        self.plan_id = Some(plan_id);
        self
    }

    pub fn with_students(mut self, students: u32) -> Self {
        self.students = students;
        self
    }
}

impl Record for School {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.to_string().into()),
            "name" => Some(self.name.as_str().into()),
            "location" => Some(self.location.as_str().into()),
            "branches" => Some(self.branches.into()),
            "students" => Some(self.students.into()),
            "status" => Some(self.status.as_str().into()),
            "created_at" => Some(self.created_at.into()),
            "contact_email" => Some(self.contact_email.as_str().into()),
            "contact_phone" => Some(self.contact_phone.as_str().into()),
            "plan_id" => self.plan_id.map(|p| p.to_string().into()),
            _ => None,
        }
    }
}

impl Entity for School {
    const TABLE: &'static str = "school";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "location", "contact_email"];

    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// A physical branch (campus) of a school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub school_id: SchoolId,
    pub location: String,
    #[serde(default)]
    pub students: u32,
    pub status: BranchStatus,
    pub created_at: DateTime<Utc>,
}

impl Branch {
    pub fn new(school_id: SchoolId, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: BranchId::new(),
            name: name.into(),
            school_id,
            location: location.into(),
            students: 0,
            status: BranchStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn with_students(mut self, students: u32) -> Self {
        self.students = students;
        self
    }
}

impl Record for Branch {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.to_string().into()),
            "name" => Some(self.name.as_str().into()),
            "school_id" => Some(self.school_id.to_string().into()),
            "location" => Some(self.location.as_str().into()),
            "students" => Some(self.students.into()),
            "status" => Some(self.status.as_str().into()),
            "created_at" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

impl Entity for Branch {
    const TABLE: &'static str = "branch";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "location"];

    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// How often a plan is billed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub const ALL: [BillingCycle; 2] = [BillingCycle::Monthly, BillingCycle::Yearly];

    pub fn as_str(self) -> &'static str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// Usage limits included in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanLimits {
    pub max_students: u32,
    pub max_branches: u32,
    pub storage_gb: u32,
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self {
            max_students: 500,
            max_branches: 1,
            storage_gb: 10,
        }
    }
}

/// A billing plan schools subscribe to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub price: f64,
    pub billing_cycle: BillingCycle,
    #[serde(default)]
    pub limits: PlanLimits,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    pub is_active: bool,
}

impl Plan {
    pub fn new(name: impl Into<String>, price: f64, billing_cycle: BillingCycle) -> Self {
        Self {
            id: PlanId::new(),
            name: name.into(),
            price,
            billing_cycle,
            limits: PlanLimits::default(),
            features: Vec::new(),
            is_active: true,
        }
    }

    pub fn with_limits(mut self, limits: PlanLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }
}

impl Record for Plan {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.to_string().into()),
            "name" => Some(self.name.as_str().into()),
            "price" => Some(self.price.into()),
            "billing_cycle" => Some(self.billing_cycle.as_str().into()),
            "max_students" => Some(self.limits.max_students.into()),
            "max_branches" => Some(self.limits.max_branches.into()),
            "storage_gb" => Some(self.limits.storage_gb.into()),
            "features" => Some(self.features.join(", ").into()),
            "is_active" => Some(self.is_active.into()),
            _ => None,
        }
    }
}

impl Entity for Plan {
    const TABLE: &'static str = "plan";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "features"];

    fn key(&self) -> String {
        self.id.to_string()
    }
}
