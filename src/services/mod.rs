pub mod context;
pub mod projects_service;
pub mod sprints_service;
pub mod tasks_service;

pub use projects_service::ProjectsService;
pub use sprints_service::SprintsService;
pub use tasks_service::TasksService;
