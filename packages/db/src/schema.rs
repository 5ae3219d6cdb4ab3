//! Database schema definitions using SurrealQL.

use school_core::{
    Assignment, AttendanceRecord, AuditLog, Branch, Class, Entity, Grade, Plan, School, Student,
    SupportTicket, Term, User,
};

use crate::{DbError, get_db};

/// Every table the platform stores.
pub const TABLES: [&str; 12] = [
    School::TABLE,
    Branch::TABLE,
    User::TABLE,
    Plan::TABLE,
    AuditLog::TABLE,
    SupportTicket::TABLE,
    Term::TABLE,
    Class::TABLE,
    Student::TABLE,
    Assignment::TABLE,
    Grade::TABLE,
    AttendanceRecord::TABLE,
];

/// Table definition for one record kind.
///
/// Rows are stored as `{ seq, data }`: `seq` preserves insertion order and
/// `data` holds the serialized record.
fn table_schema(table: &str) -> String {
    format!(
        r#"
DEFINE TABLE IF NOT EXISTS {table} SCHEMALESS;
DEFINE FIELD IF NOT EXISTS seq ON {table} TYPE int;
DEFINE INDEX IF NOT EXISTS {table}_seq ON {table} FIELDS seq;
"#
    )
}

/// Initialize the database schema.
///
/// This creates all necessary tables, fields, and indexes.
pub async fn init_schema() -> Result<(), DbError> {
    let db = get_db()?;

    tracing::info!("Initializing database schema...");

    for table in TABLES {
        db.query(table_schema(table)).await?;
    }

    tracing::info!("Database schema initialized ({} tables)", TABLES.len());

    Ok(())
}

/// Remove every row from every table.
pub async fn clear_tables() -> Result<(), DbError> {
    let db = get_db()?;

    let statement: String = TABLES.iter().map(|t| format!("DELETE {t};")).collect();
    db.query(statement).await?;

    Ok(())
}
