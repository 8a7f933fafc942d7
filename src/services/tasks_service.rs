use diesel::prelude::*;

use crate::{
    db::enums::TaskStatus,
    db::models::task::{NewTask, Task},
    db::repositories::tasks::TasksRepo,
    error::AppError,
    routes::tasks::{CreateTaskRequest, UpdateTaskRequest},
    services::context::RequestContext,
    validation::task::{parse_priority, parse_status, validate_story_points, validate_title},
};

pub struct TasksService;

impl TasksService {
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateTaskRequest,
    ) -> Result<Task, AppError> {
        validate_title(&req.title)?;
        validate_story_points(req.story_points)?;
        let status = match req.status.as_deref() {
            Some(s) => parse_status(s)?,
            None => TaskStatus::Open,
        };
        let priority = parse_priority(req.priority.as_deref())?;

        let new_task = NewTask {
            company_id: ctx.company_id,
            project_id: req.project_id,
            sprint_id: req.sprint_id,
            title: req.title.trim().to_string(),
            description: req.description.clone(),
            status,
            priority,
            story_points: req.story_points,
            assignee_user_id: req.assignee_user_id,
            created_by_user_id: ctx.user_id,
        };

        let created = TasksRepo::insert(conn, &new_task)?;
        Ok(created)
    }

    pub fn get_by_id(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: uuid::Uuid,
    ) -> Result<Task, AppError> {
        let task = TasksRepo::find_by_id_for_company(conn, ctx.company_id, task_id)?
            .ok_or_else(|| AppError::not_found("task"))?;
        Ok(task)
    }

    pub fn list_by_project(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: uuid::Uuid,
    ) -> Result<Vec<Task>, AppError> {
        let list = TasksRepo::list_by_project(conn, ctx.company_id, project_id)?;
        Ok(list)
    }

    pub fn list_backlog(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: uuid::Uuid,
    ) -> Result<Vec<Task>, AppError> {
        let list = TasksRepo::list_backlog(conn, ctx.company_id, project_id)?;
        Ok(list)
    }

    pub fn list_by_sprint(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: uuid::Uuid,
    ) -> Result<Vec<Task>, AppError> {
        let list = TasksRepo::list_by_sprint(conn, ctx.company_id, sprint_id)?;
        Ok(list)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: uuid::Uuid,
        req: &UpdateTaskRequest,
    ) -> Result<Task, AppError> {
        validate_title(&req.title)?;
        validate_story_points(req.story_points)?;
        let status = parse_status(&req.status)?;
        let priority = parse_priority(req.priority.as_deref())?;

        let existing = TasksRepo::find_by_id_for_company(conn, ctx.company_id, task_id)?
            .ok_or_else(|| AppError::not_found("task"))?;

        let updated = TasksRepo::update_details(
            conn,
            existing.id,
            req.title.trim(),
            req.description.as_deref(),
            status,
            priority,
            req.story_points,
        )?;
        Ok(updated)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: uuid::Uuid,
    ) -> Result<(), AppError> {
        let affected = TasksRepo::delete_for_company(conn, ctx.company_id, task_id)?;
        if affected == 0 {
            return Err(AppError::not_found("task"));
        }
        Ok(())
    }

    pub fn move_to_sprint(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: uuid::Uuid,
        sprint_id: uuid::Uuid,
    ) -> Result<(), AppError> {
        let affected = TasksRepo::set_sprint(conn, ctx.company_id, task_id, Some(sprint_id))?;
        if affected == 0 {
            return Err(AppError::not_found("task"));
        }
        Ok(())
    }

    pub fn move_to_backlog(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: uuid::Uuid,
    ) -> Result<(), AppError> {
        let affected = TasksRepo::set_sprint(conn, ctx.company_id, task_id, None)?;
        if affected == 0 {
            return Err(AppError::not_found("task"));
        }
        Ok(())
    }

    pub fn set_status(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: uuid::Uuid,
        status: TaskStatus,
    ) -> Result<(), AppError> {
        let affected = TasksRepo::set_status(conn, ctx.company_id, task_id, status)?;
        if affected == 0 {
            return Err(AppError::not_found("task"));
        }
        Ok(())
    }

    pub fn assign(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: uuid::Uuid,
        assignee_user_id: Option<uuid::Uuid>,
    ) -> Result<(), AppError> {
        let affected = TasksRepo::set_assignee(conn, ctx.company_id, task_id, assignee_user_id)?;
        if affected == 0 {
            return Err(AppError::not_found("task"));
        }
        Ok(())
    }
}
