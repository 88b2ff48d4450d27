//! RenameStage command

use async_trait::async_trait;
use tracing::info;

use crewboard_query::QueryOptions;
use crewboard_store::{Stored, StoreError};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Stage, StageId};

/// Rename a stage definition
///
/// Definitions are shared, so every board using the stage sees the new
/// name. Names stay unique across definitions; `AddStage` relies on that
/// when it matches stages by name.
#[derive(Debug)]
pub struct RenameStage {
    /// Stage to rename
    pub stage_id: StageId,
    /// New name
    pub name: String,
}

impl RenameStage {
    /// Create a new RenameStage command
    pub fn new(stage_id: StageId, name: impl Into<String>) -> Self {
        Self {
            stage_id,
            name: name.into(),
        }
    }
}

#[async_trait]
impl Execute for RenameStage {
    type Output = Stage;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Stage> {
        if self.name.trim().is_empty() {
            return Err(CrewboardError::invalid_value("name", "must not be empty"));
        }

        let mut uow = ctx.begin();

        let mut stage = uow
            .repo::<Stage>()
            .get_by_id(&self.stage_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("stage", &self.stage_id))?;

        if stage.name == self.name {
            return Ok(stage);
        }

        let name = self.name.clone();
        let stage_id = self.stage_id.clone();
        let taken = uow
            .repo::<Stage>()
            .get(
                &QueryOptions::new()
                    .with_filter(move |s: &Stage| s.name == name && s.id != stage_id),
            )
            .await?;
        if taken.is_some() {
            return Err(CrewboardError::invalid_value(
                "name",
                "another stage already has this name",
            ));
        }

        let name = self.name.clone();
        let stage_id = self.stage_id.clone();
        uow.guard(move |tables| {
            let taken = Stage::table(tables)
                .rows()
                .any(|v| v.row.name == name && v.row.id != stage_id);
            if taken {
                return Err(StoreError::constraint("stage name already in use"));
            }
            Ok(())
        });

        stage.name = self.name.clone();
        uow.repo::<Stage>().update(stage.clone()).await?;
        uow.save().await?;

        info!(stage_id = %self.stage_id, name = %self.name, "renamed stage");
        Ok(stage)
    }
}
