//! ListTickets command

use async_trait::async_trait;

use crewboard_query::Page;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::list_options;
use crate::types::{Board, BoardId, StageId, Ticket};

/// List the tickets on a board, optionally narrowed to one stage
///
/// A stage filter that matches nothing returns an empty list; only the
/// board itself must exist.
#[derive(Debug)]
pub struct ListTickets {
    /// Board whose tickets to list
    pub board_id: BoardId,
    /// Only tickets sitting in this stage
    pub stage_id: Option<StageId>,
    /// Sort field, one of `title`, `created_at`, `completed` or
    /// `assigned_to`
    pub sort_by: Option<String>,
    /// Sort direction, `asc` or `desc`
    pub direction: Option<String>,
    /// Page window; inactive pages return everything
    pub page: Option<Page>,
}

impl ListTickets {
    /// Create a new ListTickets command
    pub fn new(board_id: BoardId) -> Self {
        Self {
            board_id,
            stage_id: None,
            sort_by: None,
            direction: None,
            page: None,
        }
    }

    /// Narrow the result to one stage
    pub fn with_stage(mut self, stage_id: StageId) -> Self {
        self.stage_id = Some(stage_id);
        self
    }

    /// Sort by the given field
    pub fn with_sort(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    /// Set the sort direction
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    /// Return one page of the result
    pub fn with_page(mut self, number: i64, size: i64) -> Self {
        self.page = Some(Page::new(number, size));
        self
    }
}

#[async_trait]
impl Execute for ListTickets {
    type Output = Vec<Ticket>;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Vec<Ticket>> {
        let mut uow = ctx.begin();

        uow.repo::<Board>()
            .get_by_id(&self.board_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("board", &self.board_id))?;

        let board_id = self.board_id.clone();
        let stage_id = self.stage_id.clone();
        let options = list_options::sort_and_page(&self.sort_by, &self.direction, self.page)?
            .with_filter(move |t: &Ticket| {
                t.board_id == board_id && stage_id.as_ref().map_or(true, |s| t.stage_id == *s)
            });

        Ok(uow.repo::<Ticket>().list(&options).await?)
    }
}
