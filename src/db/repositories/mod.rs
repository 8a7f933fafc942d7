pub mod members;
pub mod projects;
pub mod sprints;
pub mod tasks;
