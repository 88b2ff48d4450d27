//! Group commands

mod add;
mod add_member;
mod get;
mod list;
mod members;
mod remove_member;

pub use add::AddGroup;
pub use add_member::AddGroupMember;
pub use get::GetGroup;
pub use list::ListGroups;
pub use members::ListGroupMembers;
pub use remove_member::RemoveGroupMember;
