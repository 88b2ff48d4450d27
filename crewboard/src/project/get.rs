//! GetProject command

use async_trait::async_trait;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Project, ProjectId};

/// Fetch one project by id
#[derive(Debug)]
pub struct GetProject {
    /// Project to fetch
    pub project_id: ProjectId,
}

impl GetProject {
    /// Create a new GetProject command
    pub fn new(project_id: ProjectId) -> Self {
        Self { project_id }
    }
}

#[async_trait]
impl Execute for GetProject {
    type Output = Project;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Project> {
        let mut uow = ctx.begin();
        uow.repo::<Project>()
            .get_by_id(&self.project_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("project", &self.project_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support;

    #[tokio::test]
    async fn test_get_project() {
        let ctx = test_support::ctx().await;
        let project = test_support::seed_project(&ctx, "Atlas").await;

        let fetched = GetProject::new(project.id.clone())
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(fetched, project);
    }

    #[tokio::test]
    async fn test_get_project_missing() {
        let ctx = test_support::ctx().await;

        let err = GetProject::new(ProjectId::new())
            .execute(&ctx)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
