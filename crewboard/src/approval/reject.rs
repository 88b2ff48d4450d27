//! RejectGroup command

use async_trait::async_trait;
use tracing::info;

use crewboard_query::QueryOptions;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{ApprovalStatus, GroupApprovalRequest, GroupId, ProjectId};

/// Reject a pending group request
///
/// The request is kept with its decision recorded; the group is not
/// attached to the project. A rejected pair can be requested again later.
#[derive(Debug)]
pub struct RejectGroup {
    /// Project the request was raised for
    pub project_id: ProjectId,
    /// Group being rejected
    pub group_id: GroupId,
}

impl RejectGroup {
    /// Create a new RejectGroup command
    pub fn new(project_id: ProjectId, group_id: GroupId) -> Self {
        Self {
            project_id,
            group_id,
        }
    }
}

#[async_trait]
impl Execute for RejectGroup {
    type Output = GroupApprovalRequest;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<GroupApprovalRequest> {
        let mut uow = ctx.begin();

        let project_id = self.project_id.clone();
        let group_id = self.group_id.clone();
        let mut request = uow
            .repo::<GroupApprovalRequest>()
            .get(
                &QueryOptions::new().with_filter(move |r: &GroupApprovalRequest| {
                    r.project_id == project_id
                        && r.group_id == group_id
                        && r.status == ApprovalStatus::Pending
                }),
            )
            .await?
            .ok_or_else(|| {
                CrewboardError::not_found("pending approval request", &self.group_id)
            })?;

        request.reject(ctx.user_id().clone());
        uow.repo::<GroupApprovalRequest>().update(request.clone()).await?;
        uow.save().await?;

        info!(
            project_id = %self.project_id,
            group_id = %self.group_id,
            decided_by = %ctx.user_id(),
            "rejected group for project"
        );
        Ok(request)
    }
}
