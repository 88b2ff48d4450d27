//! AddProject command

use async_trait::async_trait;
use tracing::info;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Project, User, UserId};

/// Add a new project
#[derive(Debug)]
pub struct AddProject {
    /// Project name
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Project lead; defaults to the acting user
    pub lead_id: Option<UserId>,
}

impl AddProject {
    /// Create a new AddProject command
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            lead_id: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the project lead
    pub fn with_lead(mut self, lead_id: UserId) -> Self {
        self.lead_id = Some(lead_id);
        self
    }
}

#[async_trait]
impl Execute for AddProject {
    type Output = Project;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Project> {
        if self.name.trim().is_empty() {
            return Err(CrewboardError::invalid_value("name", "must not be empty"));
        }

        let mut uow = ctx.begin();

        // An explicitly chosen lead must exist; the session user is
        // trusted as-is.
        let lead_id = match &self.lead_id {
            Some(lead_id) => {
                uow.repo::<User>()
                    .get_by_id(lead_id)
                    .await
                    .ok_or_else(|| CrewboardError::not_found("user", lead_id))?;
                lead_id.clone()
            }
            None => ctx.user_id().clone(),
        };

        let mut project = Project::new(self.name.clone(), lead_id, ctx.user_id().clone());
        if let Some(description) = &self.description {
            project = project.with_description(description.clone());
        }

        uow.repo::<Project>().insert(project.clone());
        uow.save().await?;

        info!(project_id = %project.id, name = %project.name, "added project");
        Ok(project)
    }
}
