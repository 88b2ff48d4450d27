//! ListBoardStages command

use async_trait::async_trait;

use crewboard_query::{QueryOptions, Sort};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Board, BoardId, BoardStage};

/// List a board's stage placements in pipeline order
#[derive(Debug)]
pub struct ListBoardStages {
    /// Board whose stages to list
    pub board_id: BoardId,
}

impl ListBoardStages {
    /// Create a new ListBoardStages command
    pub fn new(board_id: BoardId) -> Self {
        Self { board_id }
    }
}

#[async_trait]
impl Execute for ListBoardStages {
    type Output = Vec<BoardStage>;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Vec<BoardStage>> {
        let mut uow = ctx.begin();

        uow.repo::<Board>()
            .get_by_id(&self.board_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("board", &self.board_id))?;

        let board_id = self.board_id.clone();
        Ok(uow
            .repo::<BoardStage>()
            .list(
                &QueryOptions::new()
                    .with_filter(move |s: &BoardStage| s.board_id == board_id)
                    .with_sort(Sort::asc("order")),
            )
            .await?)
    }
}
