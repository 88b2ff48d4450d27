//! Domain types stored in the crewboard database.

mod approval;
mod board;
mod group;
mod ids;
mod project;
mod ticket;
mod user;

pub use approval::{ApprovalStatus, GroupApprovalRequest};
pub use board::{Board, BoardStage, Stage};
pub use group::{Group, GroupMember, GroupProject};
pub use ids::{
    ApprovalRequestId, BoardId, BoardStageId, GroupId, GroupMemberId, GroupProjectId, ProjectId,
    StageId, TicketHistoryId, TicketId, UserId,
};
pub use project::Project;
pub use ticket::{Ticket, TicketHistory, TrackedField};
pub use user::{Role, User};
