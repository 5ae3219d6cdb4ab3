//! Typed identifiers for every record kind, using ULIDs for chronological sorting.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Ulid);

        impl $name {
            /// Create a new unique ID.
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            /// Parse an ID from a string.
            pub fn parse(s: &str) -> Result<Self, ulid::DecodeError> {
                Ok(Self(Ulid::from_string(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ulid::DecodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

record_id!(
    /// Unique identifier for a school (tenant).
    SchoolId
);
record_id!(
    /// Unique identifier for a school branch.
    BranchId
);
record_id!(
    /// Unique identifier for a platform user.
    UserId
);
record_id!(
    /// Unique identifier for a billing plan.
    PlanId
);
record_id!(
    /// Unique identifier for an audit log entry.
    AuditLogId
);
record_id!(
    /// Unique identifier for a support ticket.
    TicketId
);
record_id!(
    /// Unique identifier for an academic term.
    TermId
);
record_id!(
    /// Unique identifier for a class taught by a teacher.
    ClassId
);
record_id!(StudentId);
record_id!(AssignmentId);
record_id!(GradeId);
record_id!(AttendanceId);
