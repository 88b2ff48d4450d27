//! AssignStageGroup command

use async_trait::async_trait;
use tracing::info;

use crewboard_query::QueryOptions;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Board, BoardId, BoardStage, Group, GroupId, StageId};

/// Hand ownership of a board stage to another group
#[derive(Debug)]
pub struct AssignStageGroup {
    /// Board the stage sits on
    pub board_id: BoardId,
    /// Stage changing hands
    pub stage_id: StageId,
    /// New owning group
    pub group_id: GroupId,
}

impl AssignStageGroup {
    /// Create a new AssignStageGroup command
    pub fn new(board_id: BoardId, stage_id: StageId, group_id: GroupId) -> Self {
        Self {
            board_id,
            stage_id,
            group_id,
        }
    }
}

#[async_trait]
impl Execute for AssignStageGroup {
    type Output = BoardStage;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<BoardStage> {
        let mut uow = ctx.begin();

        uow.repo::<Board>()
            .get_by_id(&self.board_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("board", &self.board_id))?;
        uow.repo::<Group>()
            .get_by_id(&self.group_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("group", &self.group_id))?;

        let board_id = self.board_id.clone();
        let stage_id = self.stage_id.clone();
        let mut placement = uow
            .repo::<BoardStage>()
            .get(
                &QueryOptions::new().with_filter(move |l: &BoardStage| {
                    l.board_id == board_id && l.stage_id == stage_id
                }),
            )
            .await?
            .ok_or_else(|| CrewboardError::not_found("stage", &self.stage_id))?;

        if placement.group_id == self.group_id {
            return Ok(placement);
        }

        placement.group_id = self.group_id.clone();
        uow.repo::<BoardStage>().update(placement.clone()).await?;
        uow.save().await?;

        info!(
            board_id = %self.board_id,
            stage_id = %self.stage_id,
            group_id = %self.group_id,
            "assigned stage to group"
        );
        Ok(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ListStageGroups;
    use crate::error::ErrorKind;
    use crate::test_support;

    #[tokio::test]
    async fn test_assign_stage_group() {
        let ctx = test_support::ctx().await;
        let pipeline = test_support::seed_pipeline(&ctx).await;
        let billing = test_support::seed_group(&ctx, "Billing").await;

        let placement = AssignStageGroup::new(
            pipeline.board.id.clone(),
            pipeline.done.stage_id.clone(),
            billing.id.clone(),
        )
        .execute(&ctx)
        .await
        .unwrap();
        assert_eq!(placement.group_id, billing.id);

        let rows = ListStageGroups::new(pipeline.board.id.clone())
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(rows[2].group_name, "Billing");
        assert_eq!(rows[0].group_name, "Platform");
    }

    #[tokio::test]
    async fn test_assign_stage_group_unknown_group() {
        let ctx = test_support::ctx().await;
        let pipeline = test_support::seed_pipeline(&ctx).await;

        let err = AssignStageGroup::new(
            pipeline.board.id.clone(),
            pipeline.done.stage_id.clone(),
            GroupId::new(),
        )
        .execute(&ctx)
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_assign_stage_not_on_board() {
        let ctx = test_support::ctx().await;
        let pipeline = test_support::seed_pipeline(&ctx).await;

        let err = AssignStageGroup::new(
            pipeline.board.id.clone(),
            StageId::new(),
            pipeline.group.id.clone(),
        )
        .execute(&ctx)
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
