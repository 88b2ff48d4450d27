//! DeleteStage command

use async_trait::async_trait;
use tracing::info;

use crewboard_query::{QueryOptions, Sort};
use crewboard_store::{Stored, StoreError};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Board, BoardId, BoardStage, StageId, Ticket};

/// Remove a stage from a board's pipeline
///
/// Fails while tickets still sit in the stage. The shared stage
/// definition survives; only the placement is removed, and the remaining
/// placements are renumbered to stay contiguous from 1.
#[derive(Debug)]
pub struct DeleteStage {
    /// Board losing the stage
    pub board_id: BoardId,
    /// Stage to remove
    pub stage_id: StageId,
}

impl DeleteStage {
    /// Create a new DeleteStage command
    pub fn new(board_id: BoardId, stage_id: StageId) -> Self {
        Self { board_id, stage_id }
    }
}

#[async_trait]
impl Execute for DeleteStage {
    type Output = ();

    async fn execute(&self, ctx: &CrewboardContext) -> Result<()> {
        let mut uow = ctx.begin();

        uow.repo::<Board>()
            .get_by_id(&self.board_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("board", &self.board_id))?;

        let board_id = self.board_id.clone();
        let links = uow
            .repo::<BoardStage>()
            .list(
                &QueryOptions::new()
                    .with_filter(move |l: &BoardStage| l.board_id == board_id)
                    .with_sort(Sort::asc("order")),
            )
            .await?;
        let target = links
            .iter()
            .find(|l| l.stage_id == self.stage_id)
            .cloned()
            .ok_or_else(|| CrewboardError::not_found("stage", &self.stage_id))?;

        let board_id = self.board_id.clone();
        let stage_id = self.stage_id.clone();
        let blocking = uow
            .repo::<Ticket>()
            .get(
                &QueryOptions::new().with_filter(move |t: &Ticket| {
                    t.board_id == board_id && t.stage_id == stage_id
                }),
            )
            .await?;
        if blocking.is_some() {
            return Err(CrewboardError::stage_has_tickets(&self.stage_id));
        }

        // A ticket may land in the stage between the check above and the
        // commit.
        let board_id = self.board_id.clone();
        let stage_id = self.stage_id.clone();
        uow.guard(move |tables| {
            let occupied = Ticket::table(tables)
                .rows()
                .any(|v| v.row.board_id == board_id && v.row.stage_id == stage_id);
            if occupied {
                return Err(StoreError::constraint("stage still has tickets"));
            }
            Ok(())
        });

        uow.repo::<BoardStage>().delete(&target).await?;

        let mut order = 0;
        for link in links {
            if link.id == target.id {
                continue;
            }
            order += 1;
            if link.order != order {
                let mut renumbered = link;
                renumbered.order = order;
                uow.repo::<BoardStage>().update(renumbered).await?;
            }
        }

        uow.save().await?;

        info!(board_id = %self.board_id, stage_id = %self.stage_id, "removed stage from board");
        Ok(())
    }
}
