//! Admin API for the school administration platform.
//!
//! [`AdminApi`] answers every list/create/update/delete call the admin
//! screens make. It runs the list-query pipeline over a [`db::Repository`],
//! validates input, records an audit trail and simulates network latency.
//!
//! # Areas
//!
//! - super admin: schools, branches, users, plans, audit logs, platform stats
//! - support admin: tickets and school overviews
//! - school admin: academic terms
//! - teacher: classes, assignments, gradebook, attendance
//!
//! # Usage
//!
//! ```ignore
//! use services::{AdminApi, ServiceConfig};
//! use db::MemoryRepository;
//!
//! let api = AdminApi::new(MemoryRepository::new(), ServiceConfig::default());
//! let page = api.get_schools(ListParams::new().with_filter("status", "active")).await?;
//! ```

mod admin;
mod config;
mod error;
mod school_admin;
mod super_admin;
mod support_admin;
mod teacher;
pub mod seed;

pub use admin::AdminApi;
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use seed::{SeedSummary, seed_demo_data};
