use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::TaskStatus;
use crate::db::models::sprint::{NewSprint, Sprint};

pub struct SprintsRepo;

impl SprintsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_sprint: &NewSprint,
    ) -> Result<Sprint, diesel::result::Error> {
        diesel::insert_into(crate::schema::sprints::table)
            .values(new_sprint)
            .get_result(conn)
    }

    pub fn find_by_id_for_company(
        conn: &mut PgConnection,
        company: Uuid,
        sprint_id: Uuid,
    ) -> Result<Option<Sprint>, diesel::result::Error> {
        use crate::schema::sprints::dsl::*;
        sprints
            .filter(id.eq(sprint_id))
            .filter(company_id.eq(company))
            .first::<Sprint>(conn)
            .optional()
    }

    pub fn exists_for_company(
        conn: &mut PgConnection,
        company: Uuid,
        sprint_id: Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::sprints::dsl::*;
        diesel::select(diesel::dsl::exists(
            sprints
                .filter(id.eq(sprint_id))
                .filter(company_id.eq(company)),
        ))
        .get_result(conn)
    }

    pub fn list_by_project(
        conn: &mut PgConnection,
        company: Uuid,
        project: Uuid,
        include_archived: bool,
    ) -> Result<Vec<Sprint>, diesel::result::Error> {
        use crate::schema::sprints::dsl as s;
        let mut query = s::sprints
            .filter(s::company_id.eq(company))
            .filter(s::project_id.eq(project))
            .into_boxed();
        if !include_archived {
            query = query.filter(s::is_archived.eq(false));
        }
        query
            .order((s::is_active.desc(), s::start_date.desc()))
            .load::<Sprint>(conn)
    }

    /// The active sprint in a project other than `exclude`, if any. Read
    /// before deactivation so carry-over can still name the previous sprint.
    pub fn find_active_in_project(
        conn: &mut PgConnection,
        company: Uuid,
        project: Uuid,
        exclude: Uuid,
    ) -> Result<Option<Sprint>, diesel::result::Error> {
        use crate::schema::sprints::dsl as s;
        s::sprints
            .filter(s::company_id.eq(company))
            .filter(s::project_id.eq(project))
            .filter(s::id.ne(exclude))
            .filter(s::is_active.eq(true))
            .first::<Sprint>(conn)
            .optional()
    }

    pub fn deactivate_all_in_project(
        conn: &mut PgConnection,
        company: Uuid,
        project: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::sprints::dsl as s;
        diesel::update(
            s::sprints
                .filter(s::company_id.eq(company))
                .filter(s::project_id.eq(project))
                .filter(s::is_active.eq(true)),
        )
        .set(s::is_active.eq(false))
        .execute(conn)
    }

    pub fn deactivate_siblings(
        conn: &mut PgConnection,
        company: Uuid,
        project: Uuid,
        keep: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::sprints::dsl as s;
        diesel::update(
            s::sprints
                .filter(s::company_id.eq(company))
                .filter(s::project_id.eq(project))
                .filter(s::id.ne(keep))
                .filter(s::is_active.eq(true)),
        )
        .set(s::is_active.eq(false))
        .execute(conn)
    }

    pub fn set_active_flag(
        conn: &mut PgConnection,
        sprint_id: Uuid,
        active: bool,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::sprints::dsl as s;
        diesel::update(s::sprints.filter(s::id.eq(sprint_id)))
            .set(s::is_active.eq(active))
            .execute(conn)
    }

    pub fn set_archived_flag(
        conn: &mut PgConnection,
        sprint_id: Uuid,
        archived: bool,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::sprints::dsl as s;
        diesel::update(s::sprints.filter(s::id.eq(sprint_id)))
            .set(s::is_archived.eq(archived))
            .execute(conn)
    }

    pub fn update_details(
        conn: &mut PgConnection,
        sprint_id: Uuid,
        sprint_name: &str,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    ) -> Result<Sprint, diesel::result::Error> {
        use crate::schema::sprints::dsl as s;
        diesel::update(s::sprints.filter(s::id.eq(sprint_id)))
            .set((
                s::name.eq(sprint_name),
                s::start_date.eq(start),
                s::end_date.eq(end),
            ))
            .get_result(conn)
    }

    /// Bulk-reassign every unfinished task of `from_sprint` to `to_sprint`.
    /// Tasks already Done stay attached to the old sprint.
    pub fn carry_over_unfinished(
        conn: &mut PgConnection,
        company: Uuid,
        project: Uuid,
        from_sprint: Uuid,
        to_sprint: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::tasks::dsl as t;
        diesel::update(
            t::tasks
                .filter(t::company_id.eq(company))
                .filter(t::project_id.eq(project))
                .filter(t::sprint_id.eq(from_sprint))
                .filter(t::status.ne(TaskStatus::Done)),
        )
        .set(t::sprint_id.eq(to_sprint))
        .execute(conn)
    }

    /// Pull a task into a sprint and mark it in progress, in one conditional
    /// update scoped by company and task id.
    pub fn move_task_to_active(
        conn: &mut PgConnection,
        company: Uuid,
        task_id: Uuid,
        sprint_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::tasks::dsl as t;
        diesel::update(
            t::tasks
                .filter(t::id.eq(task_id))
                .filter(t::company_id.eq(company)),
        )
        .set((
            t::sprint_id.eq(sprint_id),
            t::status.eq(TaskStatus::InProgress),
        ))
        .execute(conn)
    }
}
