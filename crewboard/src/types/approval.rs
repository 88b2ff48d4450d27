//! Group approval requests and their lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crewboard_query::{SortKey, Sortable};
use crewboard_store::Entity;

use crate::types::ids::{ApprovalRequestId, GroupId, ProjectId, UserId};

/// Lifecycle state of a [`GroupApprovalRequest`].
///
/// Requests start out [`Pending`](ApprovalStatus::Pending) and move to exactly
/// one terminal state when a manager decides on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Whether the request has reached a terminal state.
    pub fn is_resolved(&self) -> bool {
        matches!(self, ApprovalStatus::Approved | ApprovalStatus::Rejected)
    }
}

/// A request to attach a group to a project.
///
/// Resolved requests are kept as an audit record; only the status changes,
/// the row is never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupApprovalRequest {
    /// Unique identifier for the request.
    pub id: ApprovalRequestId,
    /// Project the group would be attached to.
    pub project_id: ProjectId,
    /// Group awaiting the decision.
    pub group_id: GroupId,
    /// Current lifecycle state.
    pub status: ApprovalStatus,
    /// When the request was raised.
    pub requested_at: DateTime<Utc>,
    /// User who approved or rejected the request, once resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<UserId>,
    /// When the request was resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

impl GroupApprovalRequest {
    /// Creates a pending request for the given project and group.
    pub fn new(project_id: ProjectId, group_id: GroupId) -> Self {
        Self {
            id: ApprovalRequestId::new(),
            project_id,
            group_id,
            status: ApprovalStatus::Pending,
            requested_at: Utc::now(),
            decided_by: None,
            decided_at: None,
        }
    }

    /// Marks the request approved by the given user.
    pub fn approve(&mut self, decided_by: UserId) {
        self.resolve(ApprovalStatus::Approved, decided_by);
    }

    /// Marks the request rejected by the given user.
    pub fn reject(&mut self, decided_by: UserId) {
        self.resolve(ApprovalStatus::Rejected, decided_by);
    }

    fn resolve(&mut self, status: ApprovalStatus, decided_by: UserId) {
        self.status = status;
        self.decided_by = Some(decided_by);
        self.decided_at = Some(Utc::now());
    }
}

impl Entity for GroupApprovalRequest {
    type Id = ApprovalRequestId;

    const KIND: &'static str = "approval request";

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

impl Sortable for GroupApprovalRequest {
    fn sort_fields() -> &'static [&'static str] {
        &["requested_at"]
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "requested_at" => Some(self.requested_at.into()),
            _ => None,
        }
    }
}
