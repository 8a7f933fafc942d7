use crate::error::AppError;

pub fn validate_project_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation(
            "Project.Name.Required",
            "Project name is required.",
        ));
    }
    if name.trim().len() > 255 {
        return Err(AppError::validation(
            "Project.Name.TooLong",
            "Project name must be at most 255 characters.",
        ));
    }
    Ok(())
}
