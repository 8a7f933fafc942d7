//! Lifecycle tests that exercise the sprint coordinator against a real
//! PostgreSQL database. Run `diesel migration run` against a scratch
//! database first, point TEST_DATABASE_URL at it, then run with
//! `cargo test -- --ignored`.

use diesel::prelude::*;
use taskdeck::db::enums::TaskStatus;
use taskdeck::error::AppError;
use taskdeck::routes::sprints::CreateSprintRequest;
use taskdeck::routes::tasks::CreateTaskRequest;
use taskdeck::schema::{companies, sprints, users};
use taskdeck::services::context::RequestContext;
use taskdeck::services::{ProjectsService, SprintsService, TasksService};
use uuid::Uuid;

fn establish() -> PgConnection {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    PgConnection::establish(&url).expect("failed to connect to test database")
}

fn seed_context(conn: &mut PgConnection) -> RequestContext {
    let company_id: Uuid = diesel::insert_into(companies::table)
        .values(companies::name.eq(format!("Acme {}", Uuid::new_v4())))
        .returning(companies::id)
        .get_result(conn)
        .expect("failed to seed company");

    let marker = Uuid::new_v4();
    let user_id: Uuid = diesel::insert_into(users::table)
        .values((
            users::email.eq(format!("{}@example.com", marker)),
            users::username.eq(format!("user-{}", marker)),
            users::name.eq("Test User"),
            users::company_id.eq(Some(company_id)),
        ))
        .returning(users::id)
        .get_result(conn)
        .expect("failed to seed user");

    RequestContext {
        user_id,
        company_id,
    }
}

fn sprint_request(project_id: Uuid, name: &str, is_active: bool) -> CreateSprintRequest {
    CreateSprintRequest {
        name: name.to_string(),
        start_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
        end_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15),
        project_id,
        is_active,
    }
}

fn task_request(project_id: Uuid, sprint_id: Option<Uuid>, title: &str, status: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_string(),
        description: None,
        project_id: Some(project_id),
        sprint_id,
        status: Some(status.to_string()),
        priority: None,
        story_points: None,
        assignee_user_id: None,
    }
}

fn active_sprint_count(conn: &mut PgConnection, company: Uuid, project: Uuid) -> i64 {
    sprints::table
        .filter(sprints::company_id.eq(company))
        .filter(sprints::project_id.eq(project))
        .filter(sprints::is_active.eq(true))
        .count()
        .get_result(conn)
        .expect("failed to count active sprints")
}

#[test]
#[ignore = "requires a migrated PostgreSQL database at TEST_DATABASE_URL"]
fn activation_carries_over_unfinished_tasks_only() {
    let mut conn = establish();
    let ctx = seed_context(&mut conn);
    let project = ProjectsService::create(&mut conn, &ctx, "Carry Over").unwrap();

    let s1 = SprintsService::create(&mut conn, &ctx, &sprint_request(project.id, "S1", true)).unwrap();
    let done = TasksService::create(
        &mut conn,
        &ctx,
        &task_request(project.id, Some(s1.id), "finished", "Done"),
    )
    .unwrap();
    let open = TasksService::create(
        &mut conn,
        &ctx,
        &task_request(project.id, Some(s1.id), "unfinished", "Open"),
    )
    .unwrap();

    let s2 = SprintsService::create(&mut conn, &ctx, &sprint_request(project.id, "S2", false)).unwrap();

    SprintsService::activate_existing_and_carry_over(&mut conn, &ctx, s2.id, true).unwrap();

    let s1_after = SprintsService::get_by_id(&mut conn, &ctx, s1.id).unwrap().sprint;
    let s2_after = SprintsService::get_by_id(&mut conn, &ctx, s2.id).unwrap().sprint;
    assert!(!s1_after.is_active);
    assert!(s2_after.is_active);

    // Done stays behind permanently; Open follows the new sprint.
    let done_after = TasksService::get_by_id(&mut conn, &ctx, done.id).unwrap();
    let open_after = TasksService::get_by_id(&mut conn, &ctx, open.id).unwrap();
    assert_eq!(done_after.sprint_id, Some(s1.id));
    assert_eq!(open_after.sprint_id, Some(s2.id));
    assert_eq!(open_after.status, TaskStatus::Open);

    assert_eq!(active_sprint_count(&mut conn, ctx.company_id, project.id), 1);
}

#[test]
#[ignore = "requires a migrated PostgreSQL database at TEST_DATABASE_URL"]
fn activation_without_carry_over_leaves_tasks_in_place() {
    let mut conn = establish();
    let ctx = seed_context(&mut conn);
    let project = ProjectsService::create(&mut conn, &ctx, "No Carry Over").unwrap();

    let s1 = SprintsService::create(&mut conn, &ctx, &sprint_request(project.id, "S1", true)).unwrap();
    let open = TasksService::create(
        &mut conn,
        &ctx,
        &task_request(project.id, Some(s1.id), "stays", "Open"),
    )
    .unwrap();
    let s2 = SprintsService::create(&mut conn, &ctx, &sprint_request(project.id, "S2", false)).unwrap();

    SprintsService::activate_existing_and_carry_over(&mut conn, &ctx, s2.id, false).unwrap();

    let open_after = TasksService::get_by_id(&mut conn, &ctx, open.id).unwrap();
    assert_eq!(open_after.sprint_id, Some(s1.id));
    assert_eq!(active_sprint_count(&mut conn, ctx.company_id, project.id), 1);
}

#[test]
#[ignore = "requires a migrated PostgreSQL database at TEST_DATABASE_URL"]
fn archiving_an_active_sprint_is_rejected() {
    let mut conn = establish();
    let ctx = seed_context(&mut conn);
    let project = ProjectsService::create(&mut conn, &ctx, "Archive").unwrap();
    let sprint = SprintsService::create(&mut conn, &ctx, &sprint_request(project.id, "S1", true)).unwrap();

    let err = SprintsService::set_archived(&mut conn, &ctx, sprint.id, true).unwrap_err();
    match err {
        AppError::DomainRule { code, .. } => assert_eq!(code, "Sprint.ActiveCannotArchive"),
        other => panic!("expected domain rule error, got {:?}", other),
    }

    // The sprint is unchanged.
    let after = SprintsService::get_by_id(&mut conn, &ctx, sprint.id).unwrap().sprint;
    assert!(after.is_active);
    assert!(!after.is_archived);

    // Deactivate first, then archiving succeeds; unarchiving needs no
    // precondition.
    SprintsService::set_active(&mut conn, &ctx, sprint.id, false).unwrap();
    SprintsService::set_archived(&mut conn, &ctx, sprint.id, true).unwrap();
    SprintsService::set_archived(&mut conn, &ctx, sprint.id, false).unwrap();
}

#[test]
#[ignore = "requires a migrated PostgreSQL database at TEST_DATABASE_URL"]
fn set_active_is_idempotent() {
    let mut conn = establish();
    let ctx = seed_context(&mut conn);
    let project = ProjectsService::create(&mut conn, &ctx, "Idempotent").unwrap();
    let sprint = SprintsService::create(&mut conn, &ctx, &sprint_request(project.id, "S1", false)).unwrap();

    SprintsService::set_active(&mut conn, &ctx, sprint.id, true).unwrap();
    SprintsService::set_active(&mut conn, &ctx, sprint.id, true).unwrap();

    let after = SprintsService::get_by_id(&mut conn, &ctx, sprint.id).unwrap().sprint;
    assert!(after.is_active);
    assert_eq!(active_sprint_count(&mut conn, ctx.company_id, project.id), 1);
}

#[test]
#[ignore = "requires a migrated PostgreSQL database at TEST_DATABASE_URL"]
fn create_inactive_then_activate_matches_create_active() {
    let mut conn = establish();
    let ctx = seed_context(&mut conn);

    let p1 = ProjectsService::create(&mut conn, &ctx, "Direct").unwrap();
    let direct = SprintsService::create(&mut conn, &ctx, &sprint_request(p1.id, "S", true)).unwrap();

    let p2 = ProjectsService::create(&mut conn, &ctx, "Two Step").unwrap();
    let staged = SprintsService::create(&mut conn, &ctx, &sprint_request(p2.id, "S", false)).unwrap();
    SprintsService::set_active(&mut conn, &ctx, staged.id, true).unwrap();

    let direct_after = SprintsService::get_by_id(&mut conn, &ctx, direct.id).unwrap().sprint;
    let staged_after = SprintsService::get_by_id(&mut conn, &ctx, staged.id).unwrap().sprint;
    assert!(direct_after.is_active);
    assert!(staged_after.is_active);
    assert_eq!(active_sprint_count(&mut conn, ctx.company_id, p1.id), 1);
    assert_eq!(active_sprint_count(&mut conn, ctx.company_id, p2.id), 1);
}

#[test]
#[ignore = "requires a migrated PostgreSQL database at TEST_DATABASE_URL"]
fn set_active_on_missing_sprint_is_a_silent_noop() {
    let mut conn = establish();
    let ctx = seed_context(&mut conn);

    // Inherited fire-and-forget contract: success with no indication that
    // nothing happened.
    SprintsService::set_active(&mut conn, &ctx, Uuid::new_v4(), true).unwrap();
}

#[test]
#[ignore = "requires a migrated PostgreSQL database at TEST_DATABASE_URL"]
fn sprints_are_invisible_across_tenants() {
    let mut conn = establish();
    let ctx_a = seed_context(&mut conn);
    let ctx_b = seed_context(&mut conn);

    let project = ProjectsService::create(&mut conn, &ctx_a, "Isolated").unwrap();
    let sprint = SprintsService::create(&mut conn, &ctx_a, &sprint_request(project.id, "S", true)).unwrap();

    let err = SprintsService::get_by_id(&mut conn, &ctx_b, sprint.id).unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let err = SprintsService::get_board(&mut conn, &ctx_b, sprint.id).unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[test]
#[ignore = "requires a migrated PostgreSQL database at TEST_DATABASE_URL"]
fn concurrent_active_creates_leave_exactly_one_active_sprint() {
    let mut conn = establish();
    let ctx = seed_context(&mut conn);
    let project = ProjectsService::create(&mut conn, &ctx, "Race").unwrap();

    let mut handles = Vec::new();
    for i in 0..2 {
        let ctx = ctx.clone();
        let project_id = project.id;
        handles.push(std::thread::spawn(move || {
            let mut conn = establish();
            SprintsService::create(
                &mut conn,
                &ctx,
                &sprint_request(project_id, &format!("Racer {}", i), true),
            )
        }));
    }

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Under serializable isolation one of the two may be rejected and need a
    // retry; what must never happen is zero or two active sprints.
    assert!(results.iter().any(|r| r.is_ok()));
    assert_eq!(active_sprint_count(&mut conn, ctx.company_id, project.id), 1);
}

#[test]
#[ignore = "requires a migrated PostgreSQL database at TEST_DATABASE_URL"]
fn sprint_listing_orders_active_first_then_newest_start() {
    let mut conn = establish();
    let ctx = seed_context(&mut conn);
    let project = ProjectsService::create(&mut conn, &ctx, "Ordering").unwrap();

    let mut old = sprint_request(project.id, "Old", false);
    old.start_date = chrono::NaiveDate::from_ymd_opt(2023, 1, 1);
    old.end_date = chrono::NaiveDate::from_ymd_opt(2023, 1, 15);
    SprintsService::create(&mut conn, &ctx, &old).unwrap();

    let recent = SprintsService::create(&mut conn, &ctx, &sprint_request(project.id, "Recent", false)).unwrap();
    let mut active = sprint_request(project.id, "Active", true);
    active.start_date = chrono::NaiveDate::from_ymd_opt(2022, 6, 1);
    active.end_date = chrono::NaiveDate::from_ymd_opt(2022, 6, 15);
    let active = SprintsService::create(&mut conn, &ctx, &active).unwrap();

    let listed = SprintsService::list_by_project(&mut conn, &ctx, project.id, false).unwrap();
    assert_eq!(listed[0].id, active.id);
    assert_eq!(listed[1].id, recent.id);

    // Archived sprints disappear unless explicitly requested.
    SprintsService::set_active(&mut conn, &ctx, active.id, false).unwrap();
    SprintsService::set_archived(&mut conn, &ctx, active.id, true).unwrap();
    let listed = SprintsService::list_by_project(&mut conn, &ctx, project.id, false).unwrap();
    assert!(listed.iter().all(|s| s.id != active.id));
    let listed = SprintsService::list_by_project(&mut conn, &ctx, project.id, true).unwrap();
    assert!(listed.iter().any(|s| s.id == active.id));
}

#[test]
#[ignore = "requires a migrated PostgreSQL database at TEST_DATABASE_URL"]
fn move_task_to_active_sets_sprint_and_status() {
    let mut conn = establish();
    let ctx = seed_context(&mut conn);
    let project = ProjectsService::create(&mut conn, &ctx, "Pull In").unwrap();
    let sprint = SprintsService::create(&mut conn, &ctx, &sprint_request(project.id, "S", true)).unwrap();
    let task = TasksService::create(
        &mut conn,
        &ctx,
        &task_request(project.id, None, "backlog item", "Open"),
    )
    .unwrap();

    SprintsService::move_task_to_active(&mut conn, &ctx, sprint.id, task.id).unwrap();

    let after = TasksService::get_by_id(&mut conn, &ctx, task.id).unwrap();
    assert_eq!(after.sprint_id, Some(sprint.id));
    assert_eq!(after.status, TaskStatus::InProgress);

    // A sprint belonging to another tenant is a silent no-op.
    let ctx_b = seed_context(&mut conn);
    let other_project = ProjectsService::create(&mut conn, &ctx_b, "Other").unwrap();
    let foreign = SprintsService::create(&mut conn, &ctx_b, &sprint_request(other_project.id, "F", true)).unwrap();
    SprintsService::move_task_to_active(&mut conn, &ctx, foreign.id, task.id).unwrap();
    let unchanged = TasksService::get_by_id(&mut conn, &ctx, task.id).unwrap();
    assert_eq!(unchanged.sprint_id, Some(sprint.id));
}

#[test]
#[ignore = "requires a migrated PostgreSQL database at TEST_DATABASE_URL"]
fn removed_member_is_restored_on_readd() {
    let mut conn = establish();
    let ctx = seed_context(&mut conn);
    let project = ProjectsService::create(&mut conn, &ctx, "Membership").unwrap();

    ProjectsService::add_member(&mut conn, &ctx, project.id, ctx.user_id).unwrap();
    let members = ProjectsService::list_members(&mut conn, &ctx, project.id).unwrap();
    assert_eq!(members.len(), 1);
    let member_id = members[0].id;

    // Adding twice is a conflict.
    let err = ProjectsService::add_member(&mut conn, &ctx, project.id, ctx.user_id).unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    ProjectsService::remove_member(&mut conn, &ctx, project.id, ctx.user_id).unwrap();
    assert!(ProjectsService::list_members(&mut conn, &ctx, project.id)
        .unwrap()
        .is_empty());

    // Re-adding restores the soft-deleted row rather than duplicating it.
    ProjectsService::add_member(&mut conn, &ctx, project.id, ctx.user_id).unwrap();
    let members = ProjectsService::list_members(&mut conn, &ctx, project.id).unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, member_id);
}
