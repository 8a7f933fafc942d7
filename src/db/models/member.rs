use super::SoftDeletion;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Project membership. Removal is a soft delete so a returning member keeps
// the same row instead of accumulating duplicates.
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Member {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub is_deleted: bool,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::members)]
pub struct NewMember {
    pub project_id: Uuid,
    pub user_id: Uuid,
}

impl SoftDeletion for Member {
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn deleted_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.deleted_at
    }

    fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.deleted_at = Some(chrono::Utc::now());
    }

    fn restore(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }
}
