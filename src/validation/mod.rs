use axum::{
    async_trait,
    extract::FromRequest,
    http::Request,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

pub mod project;
pub mod sprint;
pub mod task;

/// JSON extractor that runs `validator` rules on the payload before the
/// handler sees it. Shape checks (lengths, presence) live on the request
/// structs; domain checks live in the sibling modules.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(
        req: Request<axum::body::Body>,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|_| AppError::validation("Request.InvalidJson", "Invalid JSON payload"))?;

        value.validate().map_err(|errors| {
            let detail = errors
                .field_errors()
                .iter()
                .flat_map(|(field, field_errors)| {
                    field_errors.iter().map(move |error| {
                        error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("invalid value for {}", field))
                    })
                })
                .collect::<Vec<_>>()
                .join("; ");
            AppError::validation("Request.Invalid", detail)
        })?;

        Ok(ValidatedJson(value))
    }
}
