//! RemoveGroupMember command

use async_trait::async_trait;
use tracing::info;

use crewboard_query::QueryOptions;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Group, GroupId, GroupMember, UserId};

/// Remove a user from a group
#[derive(Debug)]
pub struct RemoveGroupMember {
    /// Group to remove the user from
    pub group_id: GroupId,
    /// User losing membership
    pub user_id: UserId,
}

impl RemoveGroupMember {
    /// Create a new RemoveGroupMember command
    pub fn new(group_id: GroupId, user_id: UserId) -> Self {
        Self { group_id, user_id }
    }
}

#[async_trait]
impl Execute for RemoveGroupMember {
    type Output = ();

    async fn execute(&self, ctx: &CrewboardContext) -> Result<()> {
        let mut uow = ctx.begin();

        uow.repo::<Group>()
            .get_by_id(&self.group_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("group", &self.group_id))?;

        let group_id = self.group_id.clone();
        let user_id = self.user_id.clone();
        let member = uow
            .repo::<GroupMember>()
            .get(
                &QueryOptions::new().with_filter(move |m: &GroupMember| {
                    m.group_id == group_id && m.user_id == user_id
                }),
            )
            .await?
            .ok_or_else(|| CrewboardError::not_found("group member", &self.user_id))?;

        uow.repo::<GroupMember>().delete(&member).await?;
        uow.save().await?;

        info!(group_id = %self.group_id, user_id = %self.user_id, "removed group member");
        Ok(())
    }
}
