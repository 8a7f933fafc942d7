use crate::error::AppError;

/// Both dates must be present and the range non-empty. Returns the unwrapped
/// pair so callers work with concrete dates afterwards.
pub fn validate_sprint_dates(
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
) -> Result<(chrono::NaiveDate, chrono::NaiveDate), AppError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(AppError::validation(
            "Sprint.Dates.Required",
            "StartDate and EndDate are required.",
        ));
    };

    if end <= start {
        return Err(AppError::validation(
            "Sprint.Dates.InvalidRange",
            "EndDate must be after StartDate.",
        ));
    }

    Ok((start, end))
}

pub fn validate_sprint_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation(
            "Sprint.Name.Required",
            "Sprint name is required.",
        ));
    }
    if name.trim().len() > 100 {
        return Err(AppError::validation(
            "Sprint.Name.TooLong",
            "Sprint name must be at most 100 characters.",
        ));
    }
    Ok(())
}
