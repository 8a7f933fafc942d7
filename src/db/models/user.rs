use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// User models. Provisioning (registration, credentials) happens outside this
// service; rows are only read here for membership and assignment checks.
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub name: String,
    pub is_active: bool,
    pub company_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
