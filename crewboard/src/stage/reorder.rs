//! ReorderStages command

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tracing::info;

use crewboard_query::QueryOptions;
use crewboard_store::{Stored, StoreError};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Board, BoardId, BoardStage, BoardStageId, Ticket};

/// Replace a board's pipeline with the submitted placements
///
/// Every submitted placement must already exist on the board; a reorder
/// never creates stages. Placements left out of the request are removed,
/// which fails while tickets still sit in them. Submitted orders must
/// form the contiguous sequence 1..=n.
#[derive(Debug)]
pub struct ReorderStages {
    /// Board being reworked
    pub board_id: BoardId,
    /// The complete target pipeline
    pub stages: Vec<BoardStage>,
}

impl ReorderStages {
    /// Create a new ReorderStages command
    pub fn new(board_id: BoardId, stages: Vec<BoardStage>) -> Self {
        Self { board_id, stages }
    }
}

#[async_trait]
impl Execute for ReorderStages {
    type Output = Vec<BoardStage>;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Vec<BoardStage>> {
        let mut uow = ctx.begin();

        uow.repo::<Board>()
            .get_by_id(&self.board_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("board", &self.board_id))?;

        for placement in &self.stages {
            if placement.board_id != self.board_id {
                return Err(CrewboardError::invalid_value(
                    "stages",
                    "placement belongs to another board",
                ));
            }
        }

        let mut ids = HashSet::new();
        for placement in &self.stages {
            if !ids.insert(placement.id.clone()) {
                return Err(CrewboardError::invalid_value(
                    "stages",
                    "duplicate stage placement",
                ));
            }
        }

        let mut orders: Vec<u32> = self.stages.iter().map(|p| p.order).collect();
        orders.sort_unstable();
        if !orders.iter().copied().eq(1..=self.stages.len() as u32) {
            return Err(CrewboardError::non_contiguous_order(format!("{orders:?}")));
        }

        let board_id = self.board_id.clone();
        let links = uow
            .repo::<BoardStage>()
            .list(&QueryOptions::new().with_filter(move |l: &BoardStage| l.board_id == board_id))
            .await?;
        let mut current_by_id: HashMap<BoardStageId, BoardStage> =
            links.iter().map(|l| (l.id.clone(), l.clone())).collect();

        // A placement added concurrently would keep its old order and
        // corrupt the sequence; fail the commit instead.
        let board_id = self.board_id.clone();
        let expected = links.len();
        uow.guard(move |tables| {
            let now = BoardStage::table(tables)
                .rows()
                .filter(|v| v.row.board_id == board_id)
                .count();
            if now != expected {
                return Err(StoreError::constraint("board stages changed concurrently"));
            }
            Ok(())
        });

        let mut result = Vec::with_capacity(self.stages.len());
        for placement in &self.stages {
            let Some(existing) = current_by_id.remove(&placement.id) else {
                return Err(CrewboardError::not_found("board stage", &placement.id));
            };
            if placement.stage_id != existing.stage_id {
                return Err(CrewboardError::invalid_value(
                    "stages",
                    "a reorder cannot change which stage a placement holds",
                ));
            }
            if placement.order != existing.order || placement.group_id != existing.group_id {
                let mut updated = existing;
                updated.order = placement.order;
                updated.group_id = placement.group_id.clone();
                uow.repo::<BoardStage>().update(updated.clone()).await?;
                result.push(updated);
            } else {
                result.push(existing);
            }
        }

        // Placements omitted from the request are removed.
        for leftover in current_by_id.into_values() {
            let board_id = leftover.board_id.clone();
            let stage_id = leftover.stage_id.clone();
            let occupied = uow
                .repo::<Ticket>()
                .get(
                    &QueryOptions::new().with_filter(move |t: &Ticket| {
                        t.board_id == board_id && t.stage_id == stage_id
                    }),
                )
                .await?;
            if occupied.is_some() {
                return Err(CrewboardError::stage_has_tickets(&leftover.stage_id));
            }
            uow.repo::<BoardStage>().delete(&leftover).await?;
        }

        uow.save().await?;

        result.sort_by_key(|p| p.order);
        info!(board_id = %self.board_id, stages = result.len(), "reordered board stages");
        Ok(result)
    }
}
