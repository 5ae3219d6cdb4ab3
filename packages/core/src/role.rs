//! Platform roles.

use serde::{Deserialize, Serialize};

/// Role a user holds on the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    SupportAdmin,
    SchoolAdmin,
    BranchAdmin,
    #[default]
    Teacher,
    Student,
    Parent,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::SupportAdmin,
        Role::SchoolAdmin,
        Role::BranchAdmin,
        Role::Teacher,
        Role::Student,
        Role::Parent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::SupportAdmin => "support_admin",
            Role::SchoolAdmin => "school_admin",
            Role::BranchAdmin => "branch_admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::SupportAdmin => "Support Admin",
            Role::SchoolAdmin => "School Admin",
            Role::BranchAdmin => "Branch Admin",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
            Role::Parent => "Parent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }

    /// Platform-level roles that are not tied to a school.
    pub fn is_platform(self) -> bool {
        matches!(self, Role::SuperAdmin | Role::SupportAdmin)
    }

    pub fn is_admin(self) -> bool {
        matches!(
            self,
            Role::SuperAdmin | Role::SupportAdmin | Role::SchoolAdmin | Role::BranchAdmin
        )
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
