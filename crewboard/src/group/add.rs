//! AddGroup command

use async_trait::async_trait;
use tracing::info;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Group, User, UserId};

/// Add a new group
#[derive(Debug)]
pub struct AddGroup {
    /// Group name
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Group manager; defaults to the acting user
    pub manager_id: Option<UserId>,
}

impl AddGroup {
    /// Create a new AddGroup command
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            manager_id: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the group manager
    pub fn with_manager(mut self, manager_id: UserId) -> Self {
        self.manager_id = Some(manager_id);
        self
    }
}

#[async_trait]
impl Execute for AddGroup {
    type Output = Group;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Group> {
        if self.name.trim().is_empty() {
            return Err(CrewboardError::invalid_value("name", "must not be empty"));
        }

        let mut uow = ctx.begin();

        let manager_id = match &self.manager_id {
            Some(manager_id) => {
                uow.repo::<User>()
                    .get_by_id(manager_id)
                    .await
                    .ok_or_else(|| CrewboardError::not_found("user", manager_id))?;
                manager_id.clone()
            }
            None => ctx.user_id().clone(),
        };

        let mut group = Group::new(self.name.clone(), manager_id);
        if let Some(description) = &self.description {
            group = group.with_description(description.clone());
        }

        uow.repo::<Group>().insert(group.clone());
        uow.save().await?;

        info!(group_id = %group.id, name = %group.name, "added group");
        Ok(group)
    }
}
