//! AddStage command

use async_trait::async_trait;
use tracing::info;

use crewboard_query::QueryOptions;
use crewboard_store::{Stored, StoreError};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Board, BoardId, BoardStage, Group, GroupId, Stage};

/// Place a stage at the end of a board's pipeline
///
/// Stage definitions are shared across boards: an existing stage with the
/// requested name is reused, otherwise one is created. Each stage may
/// appear on a board once, and the new placement is owned by `group_id`.
#[derive(Debug)]
pub struct AddStage {
    /// Board gaining the stage
    pub board_id: BoardId,
    /// Stage name, matched against the shared stage definitions
    pub name: String,
    /// Group responsible for tickets in this stage
    pub group_id: GroupId,
}

impl AddStage {
    /// Create a new AddStage command
    pub fn new(board_id: BoardId, name: impl Into<String>, group_id: GroupId) -> Self {
        Self {
            board_id,
            name: name.into(),
            group_id,
        }
    }
}

#[async_trait]
impl Execute for AddStage {
    type Output = BoardStage;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<BoardStage> {
        if self.name.trim().is_empty() {
            return Err(CrewboardError::invalid_value("name", "must not be empty"));
        }

        let mut uow = ctx.begin();

        uow.repo::<Board>()
            .get_by_id(&self.board_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("board", &self.board_id))?;
        uow.repo::<Group>()
            .get_by_id(&self.group_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("group", &self.group_id))?;

        let name = self.name.clone();
        let stage = match uow
            .repo::<Stage>()
            .get(&QueryOptions::new().with_filter(move |s: &Stage| s.name == name))
            .await?
        {
            Some(stage) => stage,
            None => {
                let stage = Stage::new(self.name.clone());
                uow.repo::<Stage>().insert(stage.clone());
                stage
            }
        };

        let board_id = self.board_id.clone();
        let links = uow
            .repo::<BoardStage>()
            .list(&QueryOptions::new().with_filter(move |l: &BoardStage| l.board_id == board_id))
            .await?;
        if links.iter().any(|l| l.stage_id == stage.id) {
            return Err(CrewboardError::stage_already_on_board(&stage.id));
        }
        let order = links.iter().map(|l| l.order).max().map_or(1, |o| o + 1);

        // A concurrent AddStage may claim the same stage or the same tail
        // order before this commit lands.
        let board_id = self.board_id.clone();
        let stage_id = stage.id.clone();
        uow.guard(move |tables| {
            let clash = BoardStage::table(tables).rows().any(|v| {
                v.row.board_id == board_id && (v.row.stage_id == stage_id || v.row.order >= order)
            });
            if clash {
                return Err(StoreError::constraint("stage placement collides on the board"));
            }
            Ok(())
        });

        let placement = BoardStage::new(
            self.board_id.clone(),
            stage.id.clone(),
            self.group_id.clone(),
            order,
        );
        uow.repo::<BoardStage>().insert(placement.clone());
        uow.save().await?;

        info!(
            board_id = %self.board_id,
            stage_id = %stage.id,
            order,
            "added stage to board"
        );
        Ok(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support;

    #[tokio::test]
    async fn test_add_stage_appends_to_pipeline() {
        let ctx = test_support::ctx().await;
        let project = test_support::seed_project(&ctx, "Atlas").await;
        let board = test_support::seed_board(&ctx, &project).await;
        let group = test_support::seed_group(&ctx, "Platform").await;

        let todo = AddStage::new(board.id.clone(), "Todo", group.id.clone())
            .execute(&ctx)
            .await
            .unwrap();
        let doing = AddStage::new(board.id.clone(), "Doing", group.id.clone())
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(todo.order, 1);
        assert_eq!(doing.order, 2);
        assert_eq!(todo.group_id, group.id);
    }

    #[tokio::test]
    async fn test_add_stage_reuses_definition_by_name() {
        let ctx = test_support::ctx().await;
        let group = test_support::seed_group(&ctx, "Platform").await;
        let first_project = test_support::seed_project(&ctx, "Atlas").await;
        let second_project = test_support::seed_project(&ctx, "Borealis").await;
        let first_board = test_support::seed_board(&ctx, &first_project).await;
        let second_board = test_support::seed_board(&ctx, &second_project).await;

        let a = AddStage::new(first_board.id.clone(), "Todo", group.id.clone())
            .execute(&ctx)
            .await
            .unwrap();
        let b = AddStage::new(second_board.id.clone(), "Todo", group.id.clone())
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(a.stage_id, b.stage_id);
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_add_stage_twice_on_one_board_conflicts() {
        let ctx = test_support::ctx().await;
        let project = test_support::seed_project(&ctx, "Atlas").await;
        let board = test_support::seed_board(&ctx, &project).await;
        let group = test_support::seed_group(&ctx, "Platform").await;
        AddStage::new(board.id.clone(), "Todo", group.id.clone())
            .execute(&ctx)
            .await
            .unwrap();

        let err = AddStage::new(board.id.clone(), "Todo", group.id.clone())
            .execute(&ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, CrewboardError::StageAlreadyOnBoard { .. }));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_add_stage_unknown_group() {
        let ctx = test_support::ctx().await;
        let project = test_support::seed_project(&ctx, "Atlas").await;
        let board = test_support::seed_board(&ctx, &project).await;

        let err = AddStage::new(board.id.clone(), "Todo", GroupId::new())
            .execute(&ctx)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
