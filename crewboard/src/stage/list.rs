//! ListStages command

use async_trait::async_trait;

use crewboard_query::{QueryOptions, Sort};

use crate::context::CrewboardContext;
use crate::error::Result;
use crate::execute::Execute;
use crate::types::Stage;

/// List every stage definition, sorted by name
///
/// Definitions are shared across boards; this is the catalog `AddStage`
/// matches names against.
#[derive(Debug, Default)]
pub struct ListStages;

impl ListStages {
    /// Create a new ListStages command
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Execute for ListStages {
    type Output = Vec<Stage>;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Vec<Stage>> {
        let mut uow = ctx.begin();
        Ok(uow
            .repo::<Stage>()
            .list(&QueryOptions::new().with_sort(Sort::asc("name")))
            .await?)
    }
}
