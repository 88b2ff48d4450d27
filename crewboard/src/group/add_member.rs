//! AddGroupMember command

use async_trait::async_trait;
use tracing::info;

use crewboard_query::QueryOptions;
use crewboard_store::{Stored, StoreError};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Group, GroupId, GroupMember, User, UserId};

/// Add a user to a group
///
/// Adding a user who is already a member returns the existing membership
/// unchanged.
#[derive(Debug)]
pub struct AddGroupMember {
    /// Group to add the user to
    pub group_id: GroupId,
    /// User becoming a member
    pub user_id: UserId,
}

impl AddGroupMember {
    /// Create a new AddGroupMember command
    pub fn new(group_id: GroupId, user_id: UserId) -> Self {
        Self { group_id, user_id }
    }
}

#[async_trait]
impl Execute for AddGroupMember {
    type Output = GroupMember;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<GroupMember> {
        let mut uow = ctx.begin();

        uow.repo::<Group>()
            .get_by_id(&self.group_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("group", &self.group_id))?;
        uow.repo::<User>()
            .get_by_id(&self.user_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("user", &self.user_id))?;

        let group_id = self.group_id.clone();
        let user_id = self.user_id.clone();
        let existing = uow
            .repo::<GroupMember>()
            .get(
                &QueryOptions::new().with_filter(move |m: &GroupMember| {
                    m.group_id == group_id && m.user_id == user_id
                }),
            )
            .await?;
        if let Some(member) = existing {
            return Ok(member);
        }

        // A concurrent commit may insert the same membership between our
        // read and the save; the guard turns that race into a conflict
        // instead of a duplicate row.
        let group_id = self.group_id.clone();
        let user_id = self.user_id.clone();
        uow.guard(move |tables| {
            let duplicate = GroupMember::table(tables)
                .rows()
                .any(|v| v.row.group_id == group_id && v.row.user_id == user_id);
            if duplicate {
                return Err(StoreError::constraint("user is already a group member"));
            }
            Ok(())
        });

        let member = GroupMember::new(self.group_id.clone(), self.user_id.clone());
        uow.repo::<GroupMember>().insert(member.clone());
        uow.save().await?;

        info!(group_id = %self.group_id, user_id = %self.user_id, "added group member");
        Ok(member)
    }
}
