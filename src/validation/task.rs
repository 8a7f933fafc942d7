use crate::db::enums::{TaskPriority, TaskStatus};
use crate::error::AppError;

/// Parse a wire status against the shared enum. Status mutations validate
/// here, one layer above the repository.
pub fn parse_status(status: &str) -> Result<TaskStatus, AppError> {
    TaskStatus::parse(status).ok_or_else(|| {
        let allowed: Vec<&str> = TaskStatus::ALL.iter().map(|s| s.as_str()).collect();
        AppError::validation(
            "Task.Status.Invalid",
            format!("Status must be one of: {}.", allowed.join(", ")),
        )
    })
}

pub fn parse_priority(priority: Option<&str>) -> Result<Option<TaskPriority>, AppError> {
    match priority {
        None => Ok(None),
        Some(p) => TaskPriority::parse(p).map(Some).ok_or_else(|| {
            let allowed: Vec<&str> = TaskPriority::ALL.iter().map(|p| p.as_str()).collect();
            AppError::validation(
                "Task.Priority.Invalid",
                format!("Priority must be one of: {}.", allowed.join(", ")),
            )
        }),
    }
}

pub fn validate_story_points(points: Option<i32>) -> Result<(), AppError> {
    if let Some(points) = points {
        if !(0..=100).contains(&points) {
            return Err(AppError::validation(
                "Task.StoryPoints.OutOfRange",
                "Story points must be between 0 and 100.",
            ));
        }
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation(
            "Task.Title.Required",
            "Task title is required.",
        ));
    }
    if title.len() > 200 {
        return Err(AppError::validation(
            "Task.Title.TooLong",
            "Task title must be at most 200 characters.",
        ));
    }
    Ok(())
}
