use crate::db::DbPool;
use crate::db::models::ApiResponse;
use crate::error::AppError;
use crate::middleware::auth::AuthUserInfo;
use crate::services::ProjectsService;
use crate::services::context::RequestContext;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct AddMemberRequest {
    pub user_id: Uuid,
}

#[derive(Serialize)]
pub struct MemberInfo {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub email: String,
}

pub async fn create_project(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let project = ProjectsService::create(&mut conn, &ctx, &payload.name)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(project, "Project created successfully")),
    ))
}

pub async fn get_projects(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let projects = ProjectsService::list(&mut conn, &ctx)?;
    Ok(Json(ApiResponse::success(
        projects,
        "Projects retrieved successfully",
    )))
}

pub async fn get_project_members(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    let members = ProjectsService::list_members(&mut conn, &ctx, project_id)?;
    Ok(Json(ApiResponse::success(
        members,
        "Members retrieved successfully",
    )))
}

pub async fn add_project_member(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    ProjectsService::add_member(&mut conn, &ctx, project_id, payload.user_id)?;
    Ok(Json(ApiResponse::<()>::ok("Member added")))
}

pub async fn remove_project_member(
    State(pool): State<Arc<DbPool>>,
    auth_info: AuthUserInfo,
    Path((project_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = pool.get()?;
    let ctx = RequestContext::from(&auth_info);

    ProjectsService::remove_member(&mut conn, &ctx, project_id, user_id)?;
    Ok(Json(ApiResponse::<()>::ok("Member removed")))
}
