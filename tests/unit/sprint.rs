use chrono::NaiveDate;
use taskdeck::db::enums::{TaskPriority, TaskStatus};
use taskdeck::db::models::{Sprint, Task};
use taskdeck::error::AppError;
use taskdeck::routes::sprints::SprintBoard;
use taskdeck::validation::sprint::{validate_sprint_dates, validate_sprint_name};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn validation_code(err: AppError) -> String {
    match err {
        AppError::Validation { code, .. } => code,
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn sprint_dates_must_both_be_present() {
    let err = validate_sprint_dates(None, Some(date(2024, 1, 15))).unwrap_err();
    assert_eq!(validation_code(err), "Sprint.Dates.Required");

    let err = validate_sprint_dates(Some(date(2024, 1, 1)), None).unwrap_err();
    assert_eq!(validation_code(err), "Sprint.Dates.Required");

    let err = validate_sprint_dates(None, None).unwrap_err();
    assert_eq!(validation_code(err), "Sprint.Dates.Required");
}

#[test]
fn sprint_dates_must_form_a_nonempty_range() {
    // end before start
    let err = validate_sprint_dates(Some(date(2024, 1, 1)), Some(date(2023, 12, 31))).unwrap_err();
    assert_eq!(validation_code(err), "Sprint.Dates.InvalidRange");

    // equal dates are rejected too
    let err = validate_sprint_dates(Some(date(2024, 1, 1)), Some(date(2024, 1, 1))).unwrap_err();
    assert_eq!(validation_code(err), "Sprint.Dates.InvalidRange");

    let (start, end) =
        validate_sprint_dates(Some(date(2024, 1, 1)), Some(date(2024, 1, 15))).unwrap();
    assert_eq!(start, date(2024, 1, 1));
    assert_eq!(end, date(2024, 1, 15));
}

#[test]
fn sprint_name_rules() {
    assert!(validate_sprint_name("Sprint 1").is_ok());
    assert!(validate_sprint_name("  ").is_err());
    assert!(validate_sprint_name(&"x".repeat(101)).is_err());
}

fn sprint_fixture() -> Sprint {
    Sprint {
        id: Uuid::new_v4(),
        company_id: Uuid::new_v4(),
        project_id: Some(Uuid::new_v4()),
        name: "Sprint 1".to_string(),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 1, 15),
        is_active: true,
        is_archived: false,
        created_at: chrono::Utc::now(),
    }
}

fn task_fixture(
    sprint: &Sprint,
    title: &str,
    status: TaskStatus,
    priority: Option<TaskPriority>,
) -> Task {
    Task {
        id: Uuid::new_v4(),
        company_id: sprint.company_id,
        project_id: sprint.project_id,
        sprint_id: Some(sprint.id),
        title: title.to_string(),
        description: None,
        status,
        priority,
        story_points: None,
        assignee_user_id: None,
        created_by_user_id: Uuid::new_v4(),
        created_at: chrono::Utc::now(),
    }
}

#[test]
fn board_partitions_by_status_and_priority_independently() {
    let sprint = sprint_fixture();
    let tasks = vec![
        task_fixture(&sprint, "a", TaskStatus::Open, Some(TaskPriority::Low)),
        task_fixture(&sprint, "b", TaskStatus::Done, None),
        task_fixture(&sprint, "c", TaskStatus::Open, Some(TaskPriority::High)),
    ];

    let board = SprintBoard::partition(&sprint, tasks);

    assert_eq!(board.sprint_id, sprint.id);
    assert_eq!(board.sprint_name, sprint.name);
    assert_eq!(board.project_id, sprint.project_id);

    // Status buckets cover every task exactly once.
    assert_eq!(board.open.len(), 2);
    assert_eq!(board.in_progress.len(), 0);
    assert_eq!(board.blocked.len(), 0);
    assert_eq!(board.done.len(), 1);

    // The priority-less task "b" is in a status bucket but in no priority
    // bucket.
    assert_eq!(board.low.len(), 1);
    assert_eq!(board.medium.len(), 0);
    assert_eq!(board.high.len(), 1);
    assert_eq!(board.critical.len(), 0);
    assert!(board.done.iter().any(|t| t.title == "b"));
    for bucket in [&board.low, &board.medium, &board.high, &board.critical] {
        assert!(bucket.iter().all(|t| t.title != "b"));
    }

    // A prioritized task appears in both partitions.
    assert!(board.open.iter().any(|t| t.title == "a"));
    assert!(board.low.iter().any(|t| t.title == "a"));
}

#[test]
fn board_preserves_input_order_within_buckets() {
    let sprint = sprint_fixture();
    // Callers pass tasks newest-first; buckets keep that order.
    let tasks = vec![
        task_fixture(&sprint, "newest", TaskStatus::Open, Some(TaskPriority::Low)),
        task_fixture(&sprint, "middle", TaskStatus::Open, Some(TaskPriority::Low)),
        task_fixture(&sprint, "oldest", TaskStatus::Open, Some(TaskPriority::Low)),
    ];

    let board = SprintBoard::partition(&sprint, tasks);

    let titles: Vec<&str> = board.open.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["newest", "middle", "oldest"]);
    let titles: Vec<&str> = board.low.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["newest", "middle", "oldest"]);
}

#[test]
fn board_of_empty_sprint_is_empty() {
    let sprint = sprint_fixture();
    let board = SprintBoard::partition(&sprint, Vec::new());
    assert!(board.open.is_empty());
    assert!(board.done.is_empty());
    assert!(board.critical.is_empty());
}
