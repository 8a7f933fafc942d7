pub mod api;
pub mod member;
pub mod project;
pub mod sprint;
pub mod task;
pub mod user;

pub use api::{ApiResponse, ErrorDetail};
pub use member::{Member, NewMember};
pub use project::{NewProject, Project};
pub use sprint::{NewSprint, Sprint};
pub use task::{NewTask, Task};
pub use user::User;

/// Capability for entities whose removal is reversible state rather than a
/// row delete.
pub trait SoftDeletion {
    fn is_deleted(&self) -> bool;
    fn deleted_at(&self) -> Option<chrono::DateTime<chrono::Utc>>;
    fn mark_deleted(&mut self);
    fn restore(&mut self);
}
