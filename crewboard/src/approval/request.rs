//! RequestGroupApproval command

use async_trait::async_trait;
use tracing::info;

use crewboard_query::QueryOptions;
use crewboard_store::{Stored, StoreError};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{ApprovalStatus, Group, GroupApprovalRequest, GroupId, Project, ProjectId};

/// Ask for a group to be attached to a project
///
/// The request starts pending and waits for [`ApproveGroup`] or
/// [`RejectGroup`]. At most one pending request may exist per project and
/// group pair; resolved requests stay in the store as an audit record and
/// do not block a new one.
///
/// [`ApproveGroup`]: crate::approval::ApproveGroup
/// [`RejectGroup`]: crate::approval::RejectGroup
#[derive(Debug)]
pub struct RequestGroupApproval {
    /// Project the group should work on
    pub project_id: ProjectId,
    /// Group awaiting approval
    pub group_id: GroupId,
}

impl RequestGroupApproval {
    /// Create a new RequestGroupApproval command
    pub fn new(project_id: ProjectId, group_id: GroupId) -> Self {
        Self {
            project_id,
            group_id,
        }
    }
}

#[async_trait]
impl Execute for RequestGroupApproval {
    type Output = GroupApprovalRequest;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<GroupApprovalRequest> {
        let mut uow = ctx.begin();

        uow.repo::<Project>()
            .get_by_id(&self.project_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("project", &self.project_id))?;
        uow.repo::<Group>()
            .get_by_id(&self.group_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("group", &self.group_id))?;

        let project_id = self.project_id.clone();
        let group_id = self.group_id.clone();
        let pending = uow
            .repo::<GroupApprovalRequest>()
            .get(
                &QueryOptions::new().with_filter(move |r: &GroupApprovalRequest| {
                    r.project_id == project_id
                        && r.group_id == group_id
                        && r.status == ApprovalStatus::Pending
                }),
            )
            .await?;
        if pending.is_some() {
            return Err(CrewboardError::pending_request_exists(
                &self.project_id,
                &self.group_id,
            ));
        }

        let project_id = self.project_id.clone();
        let group_id = self.group_id.clone();
        uow.guard(move |tables| {
            let racing = GroupApprovalRequest::table(tables).rows().any(|v| {
                v.row.project_id == project_id
                    && v.row.group_id == group_id
                    && v.row.status == ApprovalStatus::Pending
            });
            if racing {
                return Err(StoreError::constraint("approval request already pending"));
            }
            Ok(())
        });

        let request = GroupApprovalRequest::new(self.project_id.clone(), self.group_id.clone());
        uow.repo::<GroupApprovalRequest>().insert(request.clone());
        uow.save().await?;

        info!(
            project_id = %self.project_id,
            group_id = %self.group_id,
            "requested group approval"
        );
        Ok(request)
    }
}
