pub mod projects;
pub mod sprints;
pub mod tasks;

use crate::AppState;
use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/projects", post(projects::create_project))
        .route("/projects", get(projects::get_projects))
        .route(
            "/projects/:project_id/members",
            get(projects::get_project_members),
        )
        .route(
            "/projects/:project_id/members",
            post(projects::add_project_member),
        )
        .route(
            "/projects/:project_id/members/:user_id",
            delete(projects::remove_project_member),
        )
        .route(
            "/projects/:project_id/sprints",
            get(sprints::get_sprints_by_project),
        )
        .route(
            "/projects/:project_id/tasks",
            get(tasks::get_project_tasks),
        )
        .route(
            "/projects/:project_id/backlog",
            get(tasks::get_project_backlog),
        )
        .route("/sprints", post(sprints::create_sprint))
        .route("/sprints/:sprint_id", get(sprints::get_sprint_by_id))
        .route("/sprints/:sprint_id", put(sprints::update_sprint))
        .route(
            "/sprints/:sprint_id/active",
            patch(sprints::set_sprint_active),
        )
        .route(
            "/sprints/:sprint_id/activate",
            post(sprints::activate_sprint),
        )
        .route(
            "/sprints/:sprint_id/archived",
            patch(sprints::set_sprint_archived),
        )
        .route("/sprints/:sprint_id/board", get(sprints::get_sprint_board))
        .route("/sprints/:sprint_id/tasks", get(tasks::get_sprint_tasks))
        .route(
            "/sprints/:sprint_id/tasks/:task_id/move-to-active",
            post(sprints::move_task_to_active),
        )
        .route("/tasks", post(tasks::create_task))
        .route("/tasks/:task_id", get(tasks::get_task))
        .route("/tasks/:task_id", put(tasks::update_task))
        .route("/tasks/:task_id", delete(tasks::delete_task))
        .route(
            "/tasks/:task_id/move-to-sprint/:sprint_id",
            post(tasks::move_task_to_sprint),
        )
        .route(
            "/tasks/:task_id/move-to-backlog",
            post(tasks::move_task_to_backlog),
        )
        .route("/tasks/:task_id/status", patch(tasks::set_task_status))
        .route("/tasks/:task_id/assign", patch(tasks::assign_task))
        .with_state(Arc::new(state.db.clone()))
}
