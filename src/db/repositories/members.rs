use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::member::{Member, NewMember};
use crate::db::models::user::User;

pub struct MembersRepo;

impl MembersRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_member: &NewMember,
    ) -> Result<Member, diesel::result::Error> {
        diesel::insert_into(crate::schema::members::table)
            .values(new_member)
            .get_result(conn)
    }

    /// Soft-deleted rows are included so re-adding a removed member can
    /// restore the original row.
    pub fn find_by_project_and_user_including_deleted(
        conn: &mut PgConnection,
        project: Uuid,
        user: Uuid,
    ) -> Result<Option<Member>, diesel::result::Error> {
        use crate::schema::members::dsl as m;
        m::members
            .filter(m::project_id.eq(project))
            .filter(m::user_id.eq(user))
            .first::<Member>(conn)
            .optional()
    }

    pub fn list_live_by_project(
        conn: &mut PgConnection,
        project: Uuid,
    ) -> Result<Vec<(Member, User)>, diesel::result::Error> {
        use crate::schema::{members, users};
        members::table
            .inner_join(users::table.on(members::user_id.eq(users::id)))
            .filter(members::project_id.eq(project))
            .filter(members::is_deleted.eq(false))
            .select((Member::as_select(), User::as_select()))
            .order(users::username.asc())
            .load::<(Member, User)>(conn)
    }

    /// Persist the in-memory deletion state (both directions).
    pub fn save_deletion_state(
        conn: &mut PgConnection,
        member: &Member,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::members::dsl as m;
        diesel::update(m::members.filter(m::id.eq(member.id)))
            .set((
                m::is_deleted.eq(member.is_deleted),
                m::deleted_at.eq(member.deleted_at),
            ))
            .execute(conn)
    }
}
