//! Workspace operations, grouped by the records they manage.

mod board;
mod members;
mod membership;
mod projects;
mod reports;
mod requests;
mod service;
mod tasks;

pub use board::MoveOutcome;
pub use requests::{
    CreateMemberRequest, CreateProjectRequest, CreateTaskRequest, UpdateMemberRequest,
    UpdateProjectRequest, UpdateTaskRequest,
};
pub use service::Workspace;
