//! Board commands

mod add;
mod get;
mod groups;
mod stages;

pub use add::AddBoard;
pub use get::{BoardView, GetBoard};
pub use groups::{ListStageGroups, StageGroup};
pub use stages::ListBoardStages;
