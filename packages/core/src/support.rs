//! Support tickets raised by schools.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{SchoolId, TicketId};
use crate::record::{Entity, FieldValue, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    #[default]
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "resolved")]
    Resolved,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [TicketStatus::Open, TicketStatus::InProgress, TicketStatus::Resolved];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    pub fn is_open(self) -> bool {
        !matches!(self, TicketStatus::Resolved)
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low = 0,
    #[default]
    Medium = 1,
    High = 2,
    Urgent = 3,
}

impl TicketPriority {
    pub const ALL: [TicketPriority; 4] = [
        TicketPriority::Low,
        TicketPriority::Medium,
        TicketPriority::High,
        TicketPriority::Urgent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Urgent => "urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    Billing,
    #[default]
    Technical,
    Account,
    FeatureRequest,
    Other,
}

impl TicketCategory {
    pub const ALL: [TicketCategory; 5] = [
        TicketCategory::Billing,
        TicketCategory::Technical,
        TicketCategory::Account,
        TicketCategory::FeatureRequest,
        TicketCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketCategory::Billing => "billing",
            TicketCategory::Technical => "technical",
            TicketCategory::Account => "account",
            TicketCategory::FeatureRequest => "feature_request",
            TicketCategory::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TicketCategory::Billing => "Billing",
            TicketCategory::Technical => "Technical",
            TicketCategory::Account => "Account",
            TicketCategory::FeatureRequest => "Feature Request",
            TicketCategory::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// A support request from a school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: TicketId,
    pub school_id: SchoolId,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: TicketCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SupportTicket {
    pub fn new(school_id: SchoolId, subject: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: TicketId::new(),
            school_id,
            subject: subject.into(),
            description: description.into(),
            status: TicketStatus::Open,
            priority: TicketPriority::default(),
            category: TicketCategory::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: TicketCategory) -> Self {
        self.category = category;
        self
    }
}

impl Record for SupportTicket {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.to_string().into()),
            "school_id" => Some(self.school_id.to_string().into()),
            "subject" => Some(self.subject.as_str().into()),
            "description" => Some(self.description.as_str().into()),
            "status" => Some(self.status.as_str().into()),
            "priority" => Some(self.priority.as_str().into()),
            // Orders by severity rather than alphabetically.
            "priority_rank" => Some(FieldValue::Number(self.priority as u8 as f64)),
            "category" => Some(self.category.as_str().into()),
            "created_at" => Some(self.created_at.into()),
            "updated_at" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

impl Entity for SupportTicket {
    const TABLE: &'static str = "support_ticket";
    const SEARCH_FIELDS: &'static [&'static str] = &["subject", "description"];

    fn key(&self) -> String {
        self.id.to_string()
    }
}
