//! Server API functions for the school administration platform.
//!
//! Every admin operation is exposed as a fullstack server function that
//! returns `Result<ApiResult<T>, ServerFnError>`: the outer error means the
//! call never reached the server, the inner one is the admin API's own
//! `{error, status}` envelope.
//!
//! - Schools and branches
//! - Users and audit logs
//! - Plans and platform statistics
//! - Support tickets
//! - Academic terms
//! - Classes, assignments, grades and attendance

mod classroom;
mod plans;
mod schools;
mod support;
mod terms;
mod users;

#[cfg(feature = "server")]
mod init;

pub use classroom::*;
pub use plans::*;
pub use schools::*;
pub use support::*;
pub use terms::*;
pub use users::*;

#[cfg(feature = "server")]
pub use init::*;

// Re-export core types for convenience
pub use school_core::{ApiError, ApiResult, ListParams, PageMeta, Paginated, SortDirection};
