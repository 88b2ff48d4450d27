//! ListGroupMembers command

use async_trait::async_trait;

use crewboard_query::QueryOptions;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Group, GroupId, GroupMember, User};

/// List the users in a group, sorted by name
#[derive(Debug)]
pub struct ListGroupMembers {
    /// Group whose members to list
    pub group_id: GroupId,
}

impl ListGroupMembers {
    /// Create a new ListGroupMembers command
    pub fn new(group_id: GroupId) -> Self {
        Self { group_id }
    }
}

#[async_trait]
impl Execute for ListGroupMembers {
    type Output = Vec<User>;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Vec<User>> {
        let mut uow = ctx.begin();

        uow.repo::<Group>()
            .get_by_id(&self.group_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("group", &self.group_id))?;

        let group_id = self.group_id.clone();
        let memberships = uow
            .repo::<GroupMember>()
            .list(&QueryOptions::new().with_filter(move |m: &GroupMember| m.group_id == group_id))
            .await?;

        let mut members = Vec::with_capacity(memberships.len());
        for membership in memberships {
            let user = uow
                .repo::<User>()
                .get_by_id(&membership.user_id)
                .await
                .ok_or_else(|| CrewboardError::not_found("user", &membership.user_id))?;
            members.push(user);
        }
        members.sort_by(|a, b| {
            (a.first_name.as_str(), a.last_name.as_str())
                .cmp(&(b.first_name.as_str(), b.last_name.as_str()))
        });
        Ok(members)
    }
}
