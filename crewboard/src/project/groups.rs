//! ListProjectGroups command

use async_trait::async_trait;

use crewboard_query::QueryOptions;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Group, GroupProject, Project, ProjectId};

/// List the groups attached to a project, sorted by name
///
/// A group appears here only after an approval request for the pair was
/// approved.
#[derive(Debug)]
pub struct ListProjectGroups {
    /// Project whose groups to list
    pub project_id: ProjectId,
}

impl ListProjectGroups {
    /// Create a new ListProjectGroups command
    pub fn new(project_id: ProjectId) -> Self {
        Self { project_id }
    }
}

#[async_trait]
impl Execute for ListProjectGroups {
    type Output = Vec<Group>;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Vec<Group>> {
        let mut uow = ctx.begin();

        uow.repo::<Project>()
            .get_by_id(&self.project_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("project", &self.project_id))?;

        let project_id = self.project_id.clone();
        let links = uow
            .repo::<GroupProject>()
            .list(
                &QueryOptions::new().with_filter(move |l: &GroupProject| l.project_id == project_id),
            )
            .await?;

        let mut groups = Vec::with_capacity(links.len());
        for link in links {
            let group = uow
                .repo::<Group>()
                .get_by_id(&link.group_id)
                .await
                .ok_or_else(|| CrewboardError::not_found("group", &link.group_id))?;
            groups.push(group);
        }
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }
}
