use taskdeck::db::enums::{TaskPriority, TaskStatus};
use taskdeck::validation::task::{
    parse_priority, parse_status, validate_story_points, validate_title,
};

#[test]
fn status_parsing_accepts_the_shared_wire_strings() {
    assert_eq!(parse_status("Open").unwrap(), TaskStatus::Open);
    assert_eq!(parse_status("InProgress").unwrap(), TaskStatus::InProgress);
    assert_eq!(parse_status("Blocked").unwrap(), TaskStatus::Blocked);
    assert_eq!(parse_status("Done").unwrap(), TaskStatus::Done);

    assert!(parse_status("open").is_err());
    assert!(parse_status("Closed").is_err());
    assert!(parse_status("").is_err());
}

#[test]
fn priority_parsing_is_optional() {
    assert_eq!(parse_priority(None).unwrap(), None);
    assert_eq!(
        parse_priority(Some("Critical")).unwrap(),
        Some(TaskPriority::Critical)
    );
    assert!(parse_priority(Some("Urgent")).is_err());
}

#[test]
fn story_points_are_bounded() {
    assert!(validate_story_points(None).is_ok());
    assert!(validate_story_points(Some(0)).is_ok());
    assert!(validate_story_points(Some(100)).is_ok());
    assert!(validate_story_points(Some(-1)).is_err());
    assert!(validate_story_points(Some(101)).is_err());
}

#[test]
fn title_rules() {
    assert!(validate_title("Fix login").is_ok());
    assert!(validate_title("   ").is_err());
    assert!(validate_title(&"x".repeat(201)).is_err());
}

#[test]
fn enum_wire_strings_round_trip() {
    for status in TaskStatus::ALL {
        assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
    }
    for priority in TaskPriority::ALL {
        assert_eq!(TaskPriority::parse(priority.as_str()), Some(priority));
    }
}
