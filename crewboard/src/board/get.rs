//! GetBoard command

use async_trait::async_trait;
use serde::Serialize;

use crewboard_query::{QueryOptions, Sort};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Board, BoardId, BoardStage};

/// A board together with its stage placements, in pipeline order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub board: Board,
    pub stages: Vec<BoardStage>,
}

/// Fetch one board and its stages by board id
#[derive(Debug)]
pub struct GetBoard {
    /// Board to fetch
    pub board_id: BoardId,
}

impl GetBoard {
    /// Create a new GetBoard command
    pub fn new(board_id: BoardId) -> Self {
        Self { board_id }
    }
}

#[async_trait]
impl Execute for GetBoard {
    type Output = BoardView;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<BoardView> {
        let mut uow = ctx.begin();

        let board = uow
            .repo::<Board>()
            .get_by_id(&self.board_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("board", &self.board_id))?;

        let board_id = self.board_id.clone();
        let stages = uow
            .repo::<BoardStage>()
            .list(
                &QueryOptions::new()
                    .with_filter(move |s: &BoardStage| s.board_id == board_id)
                    .with_sort(Sort::asc("order")),
            )
            .await?;

        Ok(BoardView { board, stages })
    }
}
