use crate::db::DbPool;
use crate::db::enums::{TaskPriority, TaskStatus};
use crate::db::models::{ApiResponse, Project, Sprint, Task};
use crate::error::AppError;
use crate::middleware::auth::AuthUserInfo;
use crate::services::SprintsService;
use crate::services::context::RequestContext;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct CreateSprintRequest {
    pub name: String,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub project_id: Uuid,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

#[derive(Deserialize)]
pub struct UpdateSprintRequest {
    pub name: String,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

#[derive(Deserialize)]
pub struct SprintListQuery {
    pub include_archived: Option<bool>,
}

#[derive(Deserialize)]
pub struct SetActiveQuery {
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct ActivateQuery {
    pub carry_over_unfinished: Option<bool>,
}

#[derive(Deserialize)]
pub struct SetArchivedQuery {
    pub is_archived: Option<bool>,
}

#[derive(Serialize)]
pub struct SprintWithProject {
    #[serde(flatten)]
    pub sprint: Sprint,
    pub project: Option<Project>,
}

/// A sprint's tasks sliced two independent ways: once by status and once by
/// priority. The same task appears in exactly one status bucket and in at
/// most one priority bucket (none when it has no priority).
#[derive(Serialize)]
pub struct SprintBoard {
    pub sprint_id: Uuid,
    pub sprint_name: String,
    pub project_id: Option<Uuid>,
    pub open: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub blocked: Vec<Task>,
    pub done: Vec<Task>,
    pub low: Vec<Task>,
    pub medium: Vec<Task>,
    pub high: Vec<Task>,
    pub critical: Vec<Task>,
}

impl SprintBoard {
    /// Input order is preserved within each bucket; callers pass tasks
    /// already sorted newest-first.
    pub fn partition(sprint: &Sprint, tasks: Vec<Task>) -> Self {
        let by_status = |status: TaskStatus| -> Vec<Task> {
            tasks
                .iter()
                .filter(|t| t.status == status)
                .cloned()
                .collect()
        };
        let by_priority = |priority: TaskPriority| -> Vec<Task> {
            tasks
                .iter()
                .filter(|t| t.priority == Some(priority))
                .cloned()
                .collect()
        };

        Self {
            sprint_id: sprint.id,
            sprint_name: sprint.name.clone(),
            project_id: sprint.project_id,
            open: by_status(TaskStatus::Open),
            in_progress: by_status(TaskStatus::InProgress),
            blocked: by_status(TaskStatus::Blocked),
            done: by_status(TaskStatus::Done),
            low: by_priority(TaskPriority::Low),
            medium: by_priority(TaskPriority::Medium),
            high: by_priority(TaskPriority::High),
            critical: by_priority(TaskPriority::Critical),
        }
    }
}

pub async fn create_sprint(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Json(payload): Json<CreateSprintRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let sprint = SprintsService::create(&mut conn, &ctx, &payload)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(sprint, "Sprint created successfully")),
    ))
}

pub async fn get_sprints_by_project(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(project_id): Path<Uuid>,
    Query(query): Query<SprintListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let sprints = SprintsService::list_by_project(
        &mut conn,
        &ctx,
        project_id,
        query.include_archived.unwrap_or(false),
    )?;
    Ok(Json(ApiResponse::success(
        sprints,
        "Sprints retrieved successfully",
    )))
}

pub async fn get_sprint_by_id(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(sprint_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let sprint = SprintsService::get_by_id(&mut conn, &ctx, sprint_id)?;
    Ok(Json(ApiResponse::success(
        sprint,
        "Sprint retrieved successfully",
    )))
}

pub async fn update_sprint(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(sprint_id): Path<Uuid>,
    Json(payload): Json<UpdateSprintRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let sprint = SprintsService::update(&mut conn, &ctx, sprint_id, &payload)?;
    Ok(Json(ApiResponse::success(
        sprint,
        "Sprint updated successfully",
    )))
}

pub async fn set_sprint_active(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(sprint_id): Path<Uuid>,
    Query(query): Query<SetActiveQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    SprintsService::set_active(&mut conn, &ctx, sprint_id, query.is_active.unwrap_or(true))?;
    Ok(Json(ApiResponse::<()>::ok("Sprint active state updated")))
}

pub async fn activate_sprint(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(sprint_id): Path<Uuid>,
    Query(query): Query<ActivateQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    SprintsService::activate_existing_and_carry_over(
        &mut conn,
        &ctx,
        sprint_id,
        query.carry_over_unfinished.unwrap_or(true),
    )?;
    Ok(Json(ApiResponse::<()>::ok("Sprint activated")))
}

pub async fn set_sprint_archived(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(sprint_id): Path<Uuid>,
    Query(query): Query<SetArchivedQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    SprintsService::set_archived(&mut conn, &ctx, sprint_id, query.is_archived.unwrap_or(true))?;
    Ok(Json(ApiResponse::<()>::ok("Sprint archived state updated")))
}

pub async fn get_sprint_board(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(sprint_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let board = SprintsService::get_board(&mut conn, &ctx, sprint_id)?;
    Ok(Json(ApiResponse::success(
        board,
        "Sprint board retrieved successfully",
    )))
}

pub async fn move_task_to_active(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path((sprint_id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    SprintsService::move_task_to_active(&mut conn, &ctx, sprint_id, task_id)?;
    Ok(Json(ApiResponse::<()>::ok("Task moved to sprint")))
}
