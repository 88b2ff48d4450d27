//! AddUser command

use async_trait::async_trait;
use tracing::info;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Role, User};

/// Add a new user
///
/// Identity and authentication live outside the tracker; this records the
/// projection other rows reference.
#[derive(Debug)]
pub struct AddUser {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Roles granted to the user
    pub roles: Vec<Role>,
}

impl AddUser {
    /// Create a new AddUser command
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            roles: Vec::new(),
        }
    }

    /// Grant roles to the new user
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }
}

#[async_trait]
impl Execute for AddUser {
    type Output = User;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<User> {
        if self.first_name.trim().is_empty() {
            return Err(CrewboardError::invalid_value(
                "first_name",
                "must not be empty",
            ));
        }
        if self.last_name.trim().is_empty() {
            return Err(CrewboardError::invalid_value(
                "last_name",
                "must not be empty",
            ));
        }

        let user =
            User::new(self.first_name.clone(), self.last_name.clone()).with_roles(self.roles.clone());

        let mut uow = ctx.begin();
        uow.repo::<User>().insert(user.clone());
        uow.save().await?;

        info!(user_id = %user.id, "added user");
        Ok(user)
    }
}
