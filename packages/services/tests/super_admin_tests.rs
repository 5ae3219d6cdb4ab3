#![allow(clippy::disallowed_methods)]

mod common;

use std::error::Error;

use school_core::{
    BranchInput, ListParams, PlanInput, Role, SchoolInput, SchoolStatus, SortDirection, UserInput,
};
use services::{AdminApi, ServiceConfig};

use common::{BrokenRepository, add_school, api, seeded_api};

#[tokio::test]
async fn test_status_filter_counts_only_matching_schools() -> Result<(), Box<dyn Error>> {
    let api = api();
    add_school(&api, "Alder", SchoolStatus::Active).await;
    add_school(&api, "Birch", SchoolStatus::Pending).await;
    add_school(&api, "Cedar", SchoolStatus::Active).await;
    add_school(&api, "Damson", SchoolStatus::Suspended).await;

    let page = api.get_schools(ListParams::new().with_filter("status", "active")).await?;
    assert_eq!(page.meta.total_items, 2);
    assert!(page.items.iter().all(|s| s.status == SchoolStatus::Active));

    let all = api.get_schools(ListParams::new().with_filter("status", "all")).await?;
    assert_eq!(all.meta.total_items, 4);
    Ok(())
}

#[tokio::test]
async fn test_create_school_without_fields_is_rejected() {
    let api = api();

    let err = api.create_school(SchoolInput::default()).await.err();
    let err = err.expect("empty input must be rejected");
    assert_eq!(err.status, 400);
    assert_eq!(err.error, "School name is required");

    let missing_location = SchoolInput {
        name: "Elm".into(),
        ..Default::default()
    };
    let err = api.create_school(missing_location).await.err();
    assert_eq!(err.map(|e| e.status), Some(400));
}

#[tokio::test]
async fn test_search_sort_and_paginate_schools() -> Result<(), Box<dyn Error>> {
    let api = api();
    for name in ["Oak Ridge", "Pine Hill", "Oakwood", "Maple Grove", "Oak Park"] {
        add_school(&api, name, SchoolStatus::Active).await;
    }

    let params = ListParams::new()
        .with_search("  OAK ")
        .sorted_by("name", SortDirection::Asc)
        .with_limit(2);
    let first = api.get_schools(params.clone()).await?;
    assert_eq!(first.meta.total_items, 3);
    assert_eq!(first.meta.total_pages, 2);
    assert!(first.meta.has_next_page);
    let names: Vec<_> = first.items.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Oak Park", "Oak Ridge"]);

    let second = api.get_schools(params.with_page(2)).await?;
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].name, "Oakwood");
    assert!(second.meta.has_prev_page);
    assert!(!second.meta.has_next_page);
    Ok(())
}

#[tokio::test]
async fn test_branch_count_follows_branch_changes() -> Result<(), Box<dyn Error>> {
    let api = api();
    let school = add_school(&api, "Willow", SchoolStatus::Active).await;
    let other = add_school(&api, "Hazel", SchoolStatus::Active).await;

    let input = |name: &str, school_id| BranchInput {
        school_id: Some(school_id),
        name: name.to_string(),
        location: "Centre".to_string(),
        ..Default::default()
    };

    let north = api.create_branch(input("North", school.id)).await?;
    api.create_branch(input("South", school.id)).await?;
    assert_eq!(api.get_school(school.id).await?.branches, 2);

    api.update_branch(north.id, input("North", other.id)).await?;
    assert_eq!(api.get_school(school.id).await?.branches, 1);
    assert_eq!(api.get_school(other.id).await?.branches, 1);

    let only_willow = api.get_branches(ListParams::new(), Some(school.id)).await?;
    assert_eq!(only_willow.meta.total_items, 1);

    api.delete_branch(north.id).await?;
    assert_eq!(api.get_school(other.id).await?.branches, 0);

    let orphan = api.create_branch(BranchInput::default()).await.err();
    assert_eq!(orphan.map(|e| e.status), Some(400));
    Ok(())
}

#[tokio::test]
async fn test_delete_school_cascades_to_branches() -> Result<(), Box<dyn Error>> {
    let api = api();
    let school = add_school(&api, "Rowan", SchoolStatus::Active).await;
    api.create_branch(BranchInput {
        school_id: Some(school.id),
        name: "Main".into(),
        location: "Centre".into(),
        ..Default::default()
    })
    .await?;

    api.delete_school(school.id).await?;

    let branches = api.get_branches(ListParams::new(), Some(school.id)).await?;
    assert!(branches.items.is_empty());
    let missing = api.get_school(school.id).await.err();
    assert_eq!(missing.map(|e| e.status), Some(404));
    let again = api.delete_school(school.id).await.err();
    assert_eq!(again.map(|e| e.status), Some(404));
    Ok(())
}

#[tokio::test]
async fn test_user_emails_are_unique_ignoring_case() -> Result<(), Box<dyn Error>> {
    let api = api();
    let school = add_school(&api, "Linden", SchoolStatus::Active).await;

    let teacher = UserInput {
        name: "Robin".into(),
        email: "robin@linden.edu".into(),
        role: Some(Role::Teacher),
        school_id: Some(school.id),
        ..Default::default()
    };
    let robin = api.create_user(teacher.clone()).await?;

    let duplicate = UserInput {
        email: "ROBIN@linden.edu".into(),
        ..teacher.clone()
    };
    let err = api.create_user(duplicate).await.err();
    assert_eq!(err.map(|e| e.status), Some(409));

    // Saving a user with their own address is not a conflict.
    let renamed = UserInput {
        name: "Robin Ash".into(),
        ..teacher
    };
    assert_eq!(api.update_user(robin.id, renamed).await?.name, "Robin Ash");
    Ok(())
}

#[tokio::test]
async fn test_school_roles_need_a_school() {
    let api = api();

    let without_school = UserInput {
        name: "Kit".into(),
        email: "kit@example.com".into(),
        role: Some(Role::SchoolAdmin),
        ..Default::default()
    };
    let err = api.create_user(without_school.clone()).await.err();
    assert_eq!(err.map(|e| e.status), Some(400));

    let platform = UserInput {
        role: Some(Role::SupportAdmin),
        ..without_school
    };
    assert!(api.create_user(platform).await.is_ok());

    let bad_email = UserInput {
        name: "Lou".into(),
        email: "not-an-email".into(),
        role: Some(Role::SuperAdmin),
        ..Default::default()
    };
    assert_eq!(api.create_user(bad_email).await.err().map(|e| e.status), Some(400));
}

#[tokio::test]
async fn test_plans_toggle_and_guard_deletion() -> Result<(), Box<dyn Error>> {
    let api = api();
    let plan = api
        .create_plan(PlanInput {
            name: "Starter".into(),
            price: Some(19.0),
            features: vec![" Gradebook ".into(), String::new()],
            ..Default::default()
        })
        .await?;
    assert!(plan.is_active);
    assert_eq!(plan.features, vec!["Gradebook"]);

    assert!(!api.toggle_plan(plan.id).await?.is_active);
    assert!(api.toggle_plan(plan.id).await?.is_active);

    let no_price = api
        .create_plan(PlanInput {
            name: "Free".into(),
            ..Default::default()
        })
        .await
        .err();
    assert_eq!(no_price.map(|e| e.status), Some(400));

    let same_name = api
        .create_plan(PlanInput {
            name: "starter".into(),
            price: Some(5.0),
            ..Default::default()
        })
        .await
        .err();
    assert_eq!(same_name.map(|e| e.status), Some(409));

    let school = api
        .create_school(SchoolInput {
            name: "Poplar".into(),
            location: "Vale".into(),
            plan_id: Some(plan.id),
            ..Default::default()
        })
        .await?;
    let in_use = api.delete_plan(plan.id).await.err();
    assert_eq!(in_use.map(|e| e.status), Some(409));

    api.delete_school(school.id).await?;
    api.delete_plan(plan.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_mutations_are_audited_newest_first() -> Result<(), Box<dyn Error>> {
    let api = api();
    let school = add_school(&api, "Aspen", SchoolStatus::Pending).await;
    api.set_school_status(school.id, SchoolStatus::Active).await?;

    let logs = api.get_audit_logs(ListParams::new()).await?;
    let actions: Vec<_> = logs.items.iter().map(|l| l.action.as_str()).collect();
    assert_eq!(actions, ["school.status", "school.create"]);
    assert_eq!(logs.items[0].resource_id, school.id.to_string());
    assert!(logs.items[0].details.contains("pending"));

    let creates = api
        .get_audit_logs(ListParams::new().with_filter("action", "school.create"))
        .await?;
    assert_eq!(creates.meta.total_items, 1);
    Ok(())
}

#[tokio::test]
async fn test_platform_stats_over_demo_data() -> Result<(), Box<dyn Error>> {
    let api = seeded_api().await?;
    let stats = api.get_platform_stats().await?;

    assert_eq!(stats.total_schools, 5);
    assert_eq!(stats.active_schools, 3);
    assert_eq!(stats.pending_schools, 1);
    assert_eq!(stats.suspended_schools, 1);
    assert_eq!(stats.total_branches, 7);
    assert_eq!(stats.active_plans, 3);
    assert_eq!(stats.open_tickets, 3);
    assert!(stats.monthly_revenue > 0.0);

    let page = api.get_schools(ListParams::new()).await?;
    let branch_total: u32 = page.items.iter().map(|s| s.branches).sum();
    assert_eq!(branch_total, 7);
    Ok(())
}

#[tokio::test]
async fn test_broken_store_degrades_lists_and_fails_writes() {
    let api = AdminApi::new(BrokenRepository, ServiceConfig::instant());

    let page = api.get_schools(ListParams::new().with_page(3).with_limit(25)).await;
    let page = page.expect("lists never fail");
    assert!(page.items.is_empty());
    assert_eq!(page.meta.current_page, 3);
    assert_eq!(page.meta.per_page, 25);
    assert_eq!(page.meta.total_items, 0);

    let err = api.get_platform_stats().await.err();
    assert_eq!(err.map(|e| e.status), Some(500));

    let err = api
        .create_school(SchoolInput {
            name: "Yew".into(),
            location: "Moor".into(),
            ..Default::default()
        })
        .await
        .err();
    assert_eq!(err.map(|e| e.status), Some(500));
}
