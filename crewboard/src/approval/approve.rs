//! ApproveGroup command

use async_trait::async_trait;
use tracing::info;

use crewboard_query::QueryOptions;
use crewboard_store::{Stored, StoreError};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{ApprovalStatus, GroupApprovalRequest, GroupId, GroupProject, ProjectId};

/// Approve a pending group request and attach the group to the project
///
/// Resolves the pending request for the pair and records the acting user
/// as the decider. Approving creates the delegation row, so the group
/// shows up in [`ListProjectGroups`] afterwards. Once a request is
/// resolved there is nothing left to approve and the command fails with
/// not found.
///
/// [`ListProjectGroups`]: crate::project::ListProjectGroups
#[derive(Debug)]
pub struct ApproveGroup {
    /// Project the request was raised for
    pub project_id: ProjectId,
    /// Group being approved
    pub group_id: GroupId,
}

impl ApproveGroup {
    /// Create a new ApproveGroup command
    pub fn new(project_id: ProjectId, group_id: GroupId) -> Self {
        Self {
            project_id,
            group_id,
        }
    }
}

#[async_trait]
impl Execute for ApproveGroup {
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

        request.approve(ctx.user_id().clone());
        uow.repo::<GroupApprovalRequest>().update(request.clone()).await?;

        let project_id = self.project_id.clone();
        let group_id = self.group_id.clone();
        let attached = uow
            .repo::<GroupProject>()
            .get(&QueryOptions::new().with_filter(move |l: &GroupProject| {
                l.project_id == project_id && l.group_id == group_id
            }))
            .await?;
        if attached.is_none() {
            let project_id = self.project_id.clone();
            let group_id = self.group_id.clone();
            // A concurrent approval of a parallel request could attach the
            // group first; fail the commit rather than duplicate the row.
            uow.guard(move |tables| {
                let racing = GroupProject::table(tables)
                    .rows()
                    .any(|v| v.row.project_id == project_id && v.row.group_id == group_id);
                if racing {
                    return Err(StoreError::constraint(
                        "group is already attached to the project",
                    ));
                }
                Ok(())
            });
            uow.repo::<GroupProject>()
                .insert(GroupProject::new(self.group_id.clone(), self.project_id.clone()));
        }

        uow.save().await?;

        info!(
            project_id = %self.project_id,
            group_id = %self.group_id,
            decided_by = %ctx.user_id(),
            "approved group for project"
        );
        Ok(request)
    }
}
