//! Project commands

mod add;
mod get;
mod groups;
mod list;

pub use add::AddProject;
pub use get::GetProject;
pub use groups::ListProjectGroups;
pub use list::ListProjects;
