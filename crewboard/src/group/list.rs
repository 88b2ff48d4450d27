//! ListGroups command

use async_trait::async_trait;

use crewboard_query::{QueryOptions, Sort};

use crate::context::CrewboardContext;
use crate::error::Result;
use crate::execute::Execute;
use crate::types::Group;

/// List every group, sorted by name
#[derive(Debug, Default)]
pub struct ListGroups;

impl ListGroups {
    /// Create a new ListGroups command
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Execute for ListGroups {
    type Output = Vec<Group>;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Vec<Group>> {
        let mut uow = ctx.begin();
        Ok(uow
            .repo::<Group>()
            .list(&QueryOptions::new().with_sort(Sort::asc("name")))
            .await?)
    }
}
