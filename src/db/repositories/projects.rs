use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::project::{NewProject, Project};

pub struct ProjectsRepo;

impl ProjectsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_project: &NewProject,
    ) -> Result<Project, diesel::result::Error> {
        diesel::insert_into(crate::schema::projects::table)
            .values(new_project)
            .get_result(conn)
    }

    pub fn exists_name_in_company(
        conn: &mut PgConnection,
        company: Uuid,
        project_name: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::select(diesel::dsl::exists(
            projects
                .filter(company_id.eq(company))
                .filter(name.eq(project_name)),
        ))
        .get_result(conn)
    }

    pub fn find_by_id_in_company(
        conn: &mut PgConnection,
        company: Uuid,
        project_id: Uuid,
    ) -> Result<Option<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(id.eq(project_id))
            .filter(company_id.eq(company))
            .first::<Project>(conn)
            .optional()
    }

    pub fn list_by_company(
        conn: &mut PgConnection,
        company: Uuid,
    ) -> Result<Vec<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(company_id.eq(company))
            .order(name.asc())
            .load::<Project>(conn)
    }
}
