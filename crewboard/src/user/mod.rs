//! User commands

mod add;
mod list;

pub use add::AddUser;
pub use list::ListUsers;
