//! ListPendingGroups command

use async_trait::async_trait;

use crewboard_query::QueryOptions;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{ApprovalStatus, Group, GroupApprovalRequest, Project, ProjectId};

/// List the groups waiting for approval on a project, sorted by name
#[derive(Debug)]
pub struct ListPendingGroups {
    /// Project whose queue to show
    pub project_id: ProjectId,
}

impl ListPendingGroups {
    /// Create a new ListPendingGroups command
    pub fn new(project_id: ProjectId) -> Self {
        Self { project_id }
    }
}

#[async_trait]
impl Execute for ListPendingGroups {
    type Output = Vec<Group>;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Vec<Group>> {
        let mut uow = ctx.begin();

        uow.repo::<Project>()
            .get_by_id(&self.project_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("project", &self.project_id))?;

        let project_id = self.project_id.clone();
        let requests = uow
            .repo::<GroupApprovalRequest>()
            .list(
                &QueryOptions::new().with_filter(move |r: &GroupApprovalRequest| {
                    r.project_id == project_id && r.status == ApprovalStatus::Pending
                }),
            )
            .await?;

        let mut groups = Vec::with_capacity(requests.len());
        for request in &requests {
            let group = uow
                .repo::<Group>()
                .get_by_id(&request.group_id)
                .await
                .ok_or_else(|| CrewboardError::not_found("group", &request.group_id))?;
            groups.push(group);
        }
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }
}
