use diesel::prelude::*;

use crate::{
    db::models::sprint::{NewSprint, Sprint},
    db::repositories::{projects::ProjectsRepo, sprints::SprintsRepo, tasks::TasksRepo},
    error::AppError,
    routes::sprints::{CreateSprintRequest, SprintBoard, SprintWithProject, UpdateSprintRequest},
    services::context::RequestContext,
    validation::sprint::{validate_sprint_dates, validate_sprint_name},
};

pub struct SprintsService;

impl SprintsService {
    pub fn list_by_project(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: uuid::Uuid,
        include_archived: bool,
    ) -> Result<Vec<Sprint>, AppError> {
        let list =
            SprintsRepo::list_by_project(conn, ctx.company_id, project_id, include_archived)?;
        Ok(list)
    }

    pub fn get_by_id(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: uuid::Uuid,
    ) -> Result<SprintWithProject, AppError> {
        let sprint = SprintsRepo::find_by_id_for_company(conn, ctx.company_id, sprint_id)?
            .ok_or_else(|| AppError::not_found("sprint"))?;

        let project = match sprint.project_id {
            Some(project_id) => ProjectsRepo::find_by_id_in_company(conn, ctx.company_id, project_id)?,
            None => None,
        };

        Ok(SprintWithProject { sprint, project })
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateSprintRequest,
    ) -> Result<Sprint, AppError> {
        let (start, end) = validate_sprint_dates(req.start_date, req.end_date)?;
        let sprint_name = req.name.trim().to_string();
        validate_sprint_name(&sprint_name)?;

        let new_sprint = NewSprint {
            company_id: ctx.company_id,
            project_id: Some(req.project_id),
            name: sprint_name,
            start_date: start,
            end_date: end,
            is_active: req.is_active,
        };

        let created = if req.is_active {
            // Deactivating siblings and inserting the new active sprint must
            // commit as one unit, or two sprints could end up active.
            conn.build_transaction()
                .serializable()
                .run(|conn| -> Result<Sprint, diesel::result::Error> {
                    SprintsRepo::deactivate_all_in_project(conn, ctx.company_id, req.project_id)?;
                    SprintsRepo::insert(conn, &new_sprint)
                })?
        } else {
            SprintsRepo::insert(conn, &new_sprint)?
        };

        tracing::info!(sprint_id = %created.id, project_id = %req.project_id, active = created.is_active, "sprint created");
        Ok(created)
    }

    /// Edits sprint facts only. Lifecycle flags (`is_active`, `is_archived`)
    /// and project ownership have their own operations.
    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: uuid::Uuid,
        req: &UpdateSprintRequest,
    ) -> Result<Sprint, AppError> {
        let (start, end) = validate_sprint_dates(req.start_date, req.end_date)?;
        let sprint_name = req.name.trim();
        validate_sprint_name(sprint_name)?;

        let existing = SprintsRepo::find_by_id_for_company(conn, ctx.company_id, sprint_id)?
            .ok_or_else(|| AppError::not_found("sprint"))?;

        let updated = SprintsRepo::update_details(conn, existing.id, sprint_name, start, end)?;
        Ok(updated)
    }

    /// Activation deactivates every sibling in the same project first, all
    /// inside one serializable transaction.
    ///
    /// An absent sprint is a silent no-op: callers cannot distinguish success
    /// from absence. That contract is inherited deliberately and is recorded
    /// in DESIGN.md rather than changed here.
    pub fn set_active(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: uuid::Uuid,
        is_active: bool,
    ) -> Result<(), AppError> {
        conn.build_transaction()
            .serializable()
            .run(|conn| -> Result<(), AppError> {
                let Some(sprint) =
                    SprintsRepo::find_by_id_for_company(conn, ctx.company_id, sprint_id)?
                else {
                    return Ok(());
                };

                if is_active {
                    if let Some(project_id) = sprint.project_id {
                        SprintsRepo::deactivate_siblings(
                            conn,
                            ctx.company_id,
                            project_id,
                            sprint.id,
                        )?;
                    }
                }

                SprintsRepo::set_active_flag(conn, sprint.id, is_active)?;
                Ok(())
            })
    }

    /// Activates an existing sprint and optionally pulls every unfinished
    /// task over from the sprint that was active until now.
    ///
    /// The previous active sprint is snapshotted before the deactivation
    /// write; the carry-over targets that snapshotted id, since re-querying
    /// for an active sibling afterwards would find nothing.
    pub fn activate_existing_and_carry_over(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: uuid::Uuid,
        carry_over_unfinished: bool,
    ) -> Result<(), AppError> {
        conn.build_transaction()
            .serializable()
            .run(|conn| -> Result<(), AppError> {
                let Some(sprint) =
                    SprintsRepo::find_by_id_for_company(conn, ctx.company_id, sprint_id)?
                else {
                    return Ok(());
                };
                let Some(project_id) = sprint.project_id else {
                    return Ok(());
                };

                let previous = SprintsRepo::find_active_in_project(
                    conn,
                    ctx.company_id,
                    project_id,
                    sprint.id,
                )?;

                SprintsRepo::deactivate_siblings(conn, ctx.company_id, project_id, sprint.id)?;
                SprintsRepo::set_active_flag(conn, sprint.id, true)?;

                if carry_over_unfinished {
                    if let Some(previous) = previous {
                        let moved = SprintsRepo::carry_over_unfinished(
                            conn,
                            ctx.company_id,
                            project_id,
                            previous.id,
                            sprint.id,
                        )?;
                        tracing::info!(
                            sprint_id = %sprint.id,
                            previous_sprint_id = %previous.id,
                            moved,
                            "carried over unfinished tasks"
                        );
                    }
                }

                Ok(())
            })
    }

    /// Archiving requires the sprint to be inactive first; it is a
    /// precondition, not an automatic side effect. Unarchiving has no such
    /// precondition because archived sprints are never active.
    pub fn set_archived(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: uuid::Uuid,
        is_archived: bool,
    ) -> Result<(), AppError> {
        let sprint = SprintsRepo::find_by_id_for_company(conn, ctx.company_id, sprint_id)?
            .ok_or_else(|| AppError::not_found("sprint"))?;

        if is_archived && sprint.is_active {
            return Err(AppError::domain_rule(
                "Sprint.ActiveCannotArchive",
                "An active sprint cannot be archived. Deactivate it first.",
            ));
        }

        let affected = SprintsRepo::set_archived_flag(conn, sprint.id, is_archived)?;
        if affected == 0 {
            return Err(AppError::operation_failed("set sprint archived"));
        }
        Ok(())
    }

    pub fn get_board(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: uuid::Uuid,
    ) -> Result<SprintBoard, AppError> {
        let sprint = SprintsRepo::find_by_id_for_company(conn, ctx.company_id, sprint_id)?
            .ok_or_else(|| AppError::not_found("sprint"))?;

        let tasks = TasksRepo::list_by_sprint(conn, ctx.company_id, sprint.id)?;
        Ok(SprintBoard::partition(&sprint, tasks))
    }

    /// Validates sprint tenancy only; the task's prior state does not matter.
    /// A sprint outside the caller's company is a silent no-op.
    pub fn move_task_to_active(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sprint_id: uuid::Uuid,
        task_id: uuid::Uuid,
    ) -> Result<(), AppError> {
        if !SprintsRepo::exists_for_company(conn, ctx.company_id, sprint_id)? {
            return Ok(());
        }

        SprintsRepo::move_task_to_active(conn, ctx.company_id, task_id, sprint_id)?;
        Ok(())
    }
}
