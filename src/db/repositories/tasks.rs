use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::{TaskPriority, TaskStatus};
use crate::db::models::task::{NewTask, Task};

pub struct TasksRepo;

impl TasksRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_task: &NewTask,
    ) -> Result<Task, diesel::result::Error> {
        diesel::insert_into(crate::schema::tasks::table)
            .values(new_task)
            .get_result(conn)
    }

    pub fn find_by_id_for_company(
        conn: &mut PgConnection,
        company: Uuid,
        task_id: Uuid,
    ) -> Result<Option<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        tasks
            .filter(id.eq(task_id))
            .filter(company_id.eq(company))
            .first::<Task>(conn)
            .optional()
    }

    pub fn list_by_project(
        conn: &mut PgConnection,
        company: Uuid,
        project: Uuid,
    ) -> Result<Vec<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl as t;
        t::tasks
            .filter(t::company_id.eq(company))
            .filter(t::project_id.eq(project))
            .order(t::created_at.desc())
            .load::<Task>(conn)
    }

    /// Project tasks with no sprint assigned.
    pub fn list_backlog(
        conn: &mut PgConnection,
        company: Uuid,
        project: Uuid,
    ) -> Result<Vec<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl as t;
        t::tasks
            .filter(t::company_id.eq(company))
            .filter(t::project_id.eq(project))
            .filter(t::sprint_id.is_null())
            .order(t::created_at.desc())
            .load::<Task>(conn)
    }

    pub fn list_by_sprint(
        conn: &mut PgConnection,
        company: Uuid,
        sprint: Uuid,
    ) -> Result<Vec<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl as t;
        t::tasks
            .filter(t::company_id.eq(company))
            .filter(t::sprint_id.eq(sprint))
            .order(t::created_at.desc())
            .load::<Task>(conn)
    }

    pub fn update_details(
        conn: &mut PgConnection,
        task_id: Uuid,
        task_title: &str,
        task_description: Option<&str>,
        task_status: TaskStatus,
        task_priority: Option<TaskPriority>,
        points: Option<i32>,
    ) -> Result<Task, diesel::result::Error> {
        use crate::schema::tasks::dsl as t;
        diesel::update(t::tasks.filter(t::id.eq(task_id)))
            .set((
                t::title.eq(task_title),
                t::description.eq(task_description),
                t::status.eq(task_status),
                t::priority.eq(task_priority),
                t::story_points.eq(points),
            ))
            .get_result(conn)
    }

    pub fn set_sprint(
        conn: &mut PgConnection,
        company: Uuid,
        task_id: Uuid,
        sprint: Option<Uuid>,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::tasks::dsl as t;
        diesel::update(
            t::tasks
                .filter(t::id.eq(task_id))
                .filter(t::company_id.eq(company)),
        )
        .set(t::sprint_id.eq(sprint))
        .execute(conn)
    }

    pub fn set_status(
        conn: &mut PgConnection,
        company: Uuid,
        task_id: Uuid,
        task_status: TaskStatus,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::tasks::dsl as t;
        diesel::update(
            t::tasks
                .filter(t::id.eq(task_id))
                .filter(t::company_id.eq(company)),
        )
        .set(t::status.eq(task_status))
        .execute(conn)
    }

    pub fn set_assignee(
        conn: &mut PgConnection,
        company: Uuid,
        task_id: Uuid,
        assignee: Option<Uuid>,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::tasks::dsl as t;
        diesel::update(
            t::tasks
                .filter(t::id.eq(task_id))
                .filter(t::company_id.eq(company)),
        )
        .set(t::assignee_user_id.eq(assignee))
        .execute(conn)
    }

    pub fn delete_for_company(
        conn: &mut PgConnection,
        company: Uuid,
        task_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::delete(
            tasks
                .filter(id.eq(task_id))
                .filter(company_id.eq(company)),
        )
        .execute(conn)
    }
}
