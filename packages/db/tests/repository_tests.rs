#![allow(clippy::disallowed_methods)]

mod common;

use chrono::NaiveDate;
use school_core::{
    Entity, Plan, BillingCycle, School, SchoolStatus, Term, SupportTicket, TicketStatus, ListParams,
    SortDirection, list_query::run_list_query,
};
use std::error::Error;

use db::{DbError, Repository, SurrealRepository};

#[tokio::test]
async fn test_surreal_repository_crud() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;
    let repo = SurrealRepository::new();

    // insert/get/update/delete
    let mut school = School::new("Northwind Academy", "Leeds").with_contact("office@northwind.test", "0113 555 0100");
    let created = repo.insert(&school).await?;
    assert_eq!(created.name, "Northwind Academy");

    let loaded: Option<School> = repo.get(&school.key()).await?;
    assert_eq!(loaded.as_ref().map(|s| s.id), Some(school.id));
    assert_eq!(loaded.map(|s| s.contact_email), Some("office@northwind.test".to_string()));

    school.status = SchoolStatus::Active;
    school.students = 420;
    let updated = repo.update(&school).await?;
    assert_eq!(updated.status, SchoolStatus::Active);

    let reloaded: Option<School> = repo.get(&school.key()).await?;
    assert_eq!(reloaded.map(|s| s.students), Some(420));

    let duplicate = repo.insert(&school).await;
    assert!(matches!(duplicate, Err(DbError::Conflict(_))));

    assert!(repo.delete::<School>(&school.key()).await?);
    let missing: Option<School> = repo.get(&school.key()).await?;
    assert!(missing.is_none());

    let ghost = repo.update(&School::new("Ghost", "Nowhere")).await;
    assert!(matches!(ghost, Err(DbError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_surreal_repository_keeps_insertion_order() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;
    let repo = SurrealRepository::new();

    let names = ["Zeta", "Alpha", "Mu", "Beta"];
    for name in names {
        repo.insert(&Plan::new(name, 10.0, BillingCycle::Monthly)).await?;
    }

    let plans: Vec<Plan> = repo.list().await?;
    let listed: Vec<&str> = plans.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(listed, names);

    // The list-query pipeline runs on top of the stored order.
    let params = ListParams::new().sorted_by("name", SortDirection::Asc).with_limit(2);
    let page = run_list_query(plans, &params, Plan::SEARCH_FIELDS);
    let first: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(first, ["Alpha", "Beta"]);
    assert_eq!(page.meta.total_pages, 2);

    Ok(())
}

#[tokio::test]
async fn test_surreal_repository_find_and_count() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;
    let repo = SurrealRepository::new();

    let school = School::new("Harbor School", "Cork");
    repo.insert(&school).await?;

    let mut resolved = SupportTicket::new(school.id, "Invoice copy", "Need a PDF copy");
    resolved.status = TicketStatus::Resolved;
    repo.insert(&resolved).await?;
    repo.insert(&SupportTicket::new(school.id, "Login loop", "Teachers cannot sign in")).await?;

    let open: Vec<SupportTicket> = repo.find(|t: &SupportTicket| t.status.is_open()).await?;
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].subject, "Login loop");
    assert_eq!(repo.count::<SupportTicket>().await?, 2);

    // Dates survive the round trip.
    let start = NaiveDate::from_ymd_opt(2026, 9, 1).ok_or("bad date")?;
    let end = NaiveDate::from_ymd_opt(2026, 12, 18).ok_or("bad date")?;
    let term = Term::new(school.id, "Autumn", start, end);
    repo.insert(&term).await?;
    let stored: Option<Term> = repo.get(&term.key()).await?;
    assert_eq!(stored.map(|t| (t.start_date, t.end_date)), Some((start, end)));

    Ok(())
}
