//! Approval workflow commands

mod approve;
mod groups;
mod pending;
mod reject;
mod request;

pub use approve::ApproveGroup;
pub use groups::ListPendingGroups;
pub use pending::ListPendingApprovals;
pub use reject::RejectGroup;
pub use request::RequestGroupApproval;
