//! Stage commands

mod add;
mod assign;
mod delete;
mod list;
mod rename;
mod reorder;

pub use add::AddStage;
pub use assign::AssignStageGroup;
pub use delete::DeleteStage;
pub use list::ListStages;
pub use rename::RenameStage;
pub use reorder::ReorderStages;
