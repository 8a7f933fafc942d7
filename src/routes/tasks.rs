use crate::db::DbPool;
use crate::db::models::ApiResponse;
use crate::error::AppError;
use crate::middleware::auth::AuthUserInfo;
use crate::services::TasksService;
use crate::services::context::RequestContext;
use crate::validation::ValidatedJson;
use crate::validation::task::parse_status;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,
    pub project_id: Option<Uuid>,
    pub sprint_id: Option<Uuid>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub story_points: Option<i32>,
    pub assignee_user_id: Option<Uuid>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,
    pub status: String,
    pub priority: Option<String>,
    pub story_points: Option<i32>,
}

#[derive(Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct AssignTaskRequest {
    pub assignee_user_id: Option<Uuid>,
}

pub async fn create_task(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<CreateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let task = TasksService::create(&mut conn, &ctx, &payload)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(task, "Task created successfully")),
    ))
}

pub async fn get_task(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let task = TasksService::get_by_id(&mut conn, &ctx, task_id)?;
    Ok(Json(ApiResponse::success(
        task,
        "Task retrieved successfully",
    )))
}

pub async fn update_task(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(task_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let task = TasksService::update(&mut conn, &ctx, task_id, &payload)?;
    Ok(Json(ApiResponse::success(task, "Task updated successfully")))
}

pub async fn delete_task(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    TasksService::delete(&mut conn, &ctx, task_id)?;
    Ok(Json(ApiResponse::<()>::ok("Task deleted successfully")))
}

pub async fn get_project_tasks(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let tasks = TasksService::list_by_project(&mut conn, &ctx, project_id)?;
    Ok(Json(ApiResponse::success(
        tasks,
        "Tasks retrieved successfully",
    )))
}

pub async fn get_project_backlog(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let tasks = TasksService::list_backlog(&mut conn, &ctx, project_id)?;
    Ok(Json(ApiResponse::success(
        tasks,
        "Backlog retrieved successfully",
    )))
}

pub async fn get_sprint_tasks(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(sprint_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let tasks = TasksService::list_by_sprint(&mut conn, &ctx, sprint_id)?;
    Ok(Json(ApiResponse::success(
        tasks,
        "Tasks retrieved successfully",
    )))
}

pub async fn move_task_to_sprint(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path((task_id, sprint_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    TasksService::move_to_sprint(&mut conn, &ctx, task_id, sprint_id)?;
    Ok(Json(ApiResponse::<()>::ok("Task moved to sprint")))
}

pub async fn move_task_to_backlog(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    TasksService::move_to_backlog(&mut conn, &ctx, task_id)?;
    Ok(Json(ApiResponse::<()>::ok("Task moved to backlog")))
}

pub async fn set_task_status(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    // Status is validated here, one layer above the repository write.
    let status = parse_status(&payload.status)?;
    TasksService::set_status(&mut conn, &ctx, task_id, status)?;
    Ok(Json(ApiResponse::<()>::ok("Task status updated")))
}

pub async fn assign_task(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<AssignTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    TasksService::assign(&mut conn, &ctx, task_id, payload.assignee_user_id)?;
    Ok(Json(ApiResponse::<()>::ok("Task assignee updated")))
}
