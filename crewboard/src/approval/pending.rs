//! ListPendingApprovals command

use async_trait::async_trait;

use crewboard_query::{QueryOptions, Sort};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{ApprovalStatus, GroupApprovalRequest, Project, ProjectId};

/// List pending approval requests, oldest first
///
/// Without a project filter this is the full review queue across all
/// projects.
#[derive(Debug, Default)]
pub struct ListPendingApprovals {
    /// Restrict the queue to one project
    pub project_id: Option<ProjectId>,
}

impl ListPendingApprovals {
    /// Create a new ListPendingApprovals command
    pub fn new() -> Self {
        Self::default()
    }

    /// Only show requests raised for this project
    pub fn for_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

#[async_trait]
impl Execute for ListPendingApprovals {
    type Output = Vec<GroupApprovalRequest>;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Vec<GroupApprovalRequest>> {
        let mut uow = ctx.begin();

        if let Some(project_id) = &self.project_id {
            uow.repo::<Project>()
                .get_by_id(project_id)
                .await
                .ok_or_else(|| CrewboardError::not_found("project", project_id))?;
        }

        let project_id = self.project_id.clone();
        let requests = uow
            .repo::<GroupApprovalRequest>()
            .list(
                &QueryOptions::new()
                    .with_filter(move |r: &GroupApprovalRequest| {
                        r.status == ApprovalStatus::Pending
                            && project_id.as_ref().map_or(true, |p| r.project_id == *p)
                    })
                    .with_sort(Sort::asc("requested_at")),
            )
            .await?;
        Ok(requests)
    }
}
