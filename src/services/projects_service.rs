use diesel::prelude::*;

use crate::{
    db::models::SoftDeletion,
    db::models::member::NewMember,
    db::models::project::{NewProject, Project},
    db::repositories::{members::MembersRepo, projects::ProjectsRepo},
    error::AppError,
    routes::projects::MemberInfo,
    services::context::RequestContext,
    validation::project::validate_project_name,
};

pub struct ProjectsService;

impl ProjectsService {
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<Project, AppError> {
        let project_name = name.trim();
        validate_project_name(project_name)?;

        if ProjectsRepo::exists_name_in_company(conn, ctx.company_id, project_name)? {
            return Err(AppError::conflict_with_code(
                "Project with the same name already exists",
                Some("name".into()),
                "PROJECT_NAME_EXISTS",
            ));
        }

        let new_project = NewProject {
            company_id: ctx.company_id,
            name: project_name.to_string(),
        };
        let created = ProjectsRepo::insert(conn, &new_project)?;
        Ok(created)
    }

    pub fn list(conn: &mut PgConnection, ctx: &RequestContext) -> Result<Vec<Project>, AppError> {
        let list = ProjectsRepo::list_by_company(conn, ctx.company_id)?;
        Ok(list)
    }

    pub fn list_members(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: uuid::Uuid,
    ) -> Result<Vec<MemberInfo>, AppError> {
        let project = ProjectsRepo::find_by_id_in_company(conn, ctx.company_id, project_id)?
            .ok_or_else(|| AppError::not_found("project"))?;

        let rows = MembersRepo::list_live_by_project(conn, project.id)?;
        let infos = rows
            .into_iter()
            .map(|(member, user)| MemberInfo {
                id: member.id,
                project_id: member.project_id,
                user_id: user.id,
                user_name: user.name,
                email: user.email,
            })
            .collect();
        Ok(infos)
    }

    /// Re-adding a previously removed member restores the soft-deleted row
    /// instead of inserting a duplicate.
    pub fn add_member(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: uuid::Uuid,
        user_id: uuid::Uuid,
    ) -> Result<(), AppError> {
        let project = ProjectsRepo::find_by_id_in_company(conn, ctx.company_id, project_id)?
            .ok_or_else(|| AppError::not_found("project"))?;

        let user_in_company: bool = {
            use crate::schema::users::dsl as u;
            diesel::select(diesel::dsl::exists(
                u::users
                    .filter(u::id.eq(user_id))
                    .filter(u::company_id.eq(ctx.company_id)),
            ))
            .get_result(conn)?
        };
        if !user_in_company {
            return Err(AppError::not_found("user"));
        }

        match MembersRepo::find_by_project_and_user_including_deleted(conn, project.id, user_id)? {
            Some(member) if !member.is_deleted => Err(AppError::conflict_with_code(
                "User is already a member of this project",
                None,
                "ALREADY_MEMBER",
            )),
            Some(mut member) => {
                member.restore();
                let affected = MembersRepo::save_deletion_state(conn, &member)?;
                if affected == 0 {
                    return Err(AppError::operation_failed("restore member"));
                }
                Ok(())
            }
            None => {
                let new_member = NewMember {
                    project_id: project.id,
                    user_id,
                };
                MembersRepo::insert(conn, &new_member)?;
                Ok(())
            }
        }
    }

    pub fn remove_member(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: uuid::Uuid,
        user_id: uuid::Uuid,
    ) -> Result<(), AppError> {
        let project = ProjectsRepo::find_by_id_in_company(conn, ctx.company_id, project_id)?
            .ok_or_else(|| AppError::not_found("project"))?;

        let member =
            MembersRepo::find_by_project_and_user_including_deleted(conn, project.id, user_id)?;
        let Some(mut member) = member.filter(|m| !m.is_deleted) else {
            return Err(AppError::not_found("member"));
        };

        member.mark_deleted();
        let affected = MembersRepo::save_deletion_state(conn, &member)?;
        if affected == 0 {
            return Err(AppError::operation_failed("remove member"));
        }
        Ok(())
    }
}
