//! GetGroup command

use async_trait::async_trait;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Group, GroupId};

/// Fetch one group by id
#[derive(Debug)]
pub struct GetGroup {
    /// Group to fetch
    pub group_id: GroupId,
}

impl GetGroup {
    /// Create a new GetGroup command
    pub fn new(group_id: GroupId) -> Self {
        Self { group_id }
    }
}

#[async_trait]
impl Execute for GetGroup {
    type Output = Group;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Group> {
        let mut uow = ctx.begin();
        uow.repo::<Group>()
            .get_by_id(&self.group_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("group", &self.group_id))
    }
}
