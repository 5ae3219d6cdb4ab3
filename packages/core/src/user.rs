//! Platform users and the audit trail of their actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Role;
use crate::ids::{AuditLogId, BranchId, SchoolId, UserId};
use crate::record::{Entity, FieldValue, Record};

/// Account status of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [UserStatus::Active, UserStatus::Inactive, UserStatus::Suspended];

    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// A person with an account on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<SchoolId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<BranchId>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            role,
            school_id: None,
            branch_id: None,
            status: UserStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn in_school(mut self, school_id: SchoolId) -> Self {
        self.school_id = Some(school_id);
        self
    }

    pub fn in_branch(mut self, branch_id: BranchId) -> Self {
        self.branch_id = Some(branch_id);
        self
    }
}

impl Record for User {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.to_string().into()),
            "name" => Some(self.name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "role" => Some(self.role.as_str().into()),
            "school_id" => self.school_id.map(|id| id.to_string().into()),
            "branch_id" => self.branch_id.map(|id| id.to_string().into()),
            "status" => Some(self.status.as_str().into()),
            "created_at" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

impl Entity for User {
    const TABLE: &'static str = "user";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "email"];

    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// One recorded administrative action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: AuditLogId,
    /// User who performed the action.
    pub user_id: UserId,
    /// Dotted action name, e.g. `school.create`.
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    #[serde(default)]
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl AuditLog {
    pub fn new(
        user_id: UserId,
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            id: AuditLogId::new(),
            user_id,
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            details: String::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }
}

impl Record for AuditLog {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.to_string().into()),
            "user_id" => Some(self.user_id.to_string().into()),
            "action" => Some(self.action.as_str().into()),
            "resource_type" => Some(self.resource_type.as_str().into()),
            "resource_id" => Some(self.resource_id.as_str().into()),
            "details" => Some(self.details.as_str().into()),
            "timestamp" => Some(self.timestamp.into()),
            _ => None,
        }
    }
}

impl Entity for AuditLog {
    const TABLE: &'static str = "audit_log";
    const SEARCH_FIELDS: &'static [&'static str] = &["action", "resource_type", "details"];

    fn key(&self) -> String {
        self.id.to_string()
    }
}
