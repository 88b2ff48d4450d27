//! AddBoard command

use async_trait::async_trait;
use tracing::info;

use crewboard_query::QueryOptions;
use crewboard_store::{Stored, StoreError};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Board, Project, ProjectId};

/// Add the board for a project
///
/// A project has at most one board. The name defaults to the project
/// name.
#[derive(Debug)]
pub struct AddBoard {
    /// Project the board belongs to
    pub project_id: ProjectId,
    /// Board name; defaults to the project name
    pub name: Option<String>,
    /// Optional longer description
    pub description: Option<String>,
}

impl AddBoard {
    /// Create a new AddBoard command
    pub fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            name: None,
            description: None,
        }
    }

    /// Set the board name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[async_trait]
impl Execute for AddBoard {
    type Output = Board;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Board> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(CrewboardError::invalid_value("name", "must not be empty"));
            }
        }

        let mut uow = ctx.begin();

        let project = uow
            .repo::<Project>()
            .get_by_id(&self.project_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("project", &self.project_id))?;

        let project_id = self.project_id.clone();
        let existing = uow
            .repo::<Board>()
            .get(&QueryOptions::new().with_filter(move |b: &Board| b.project_id == project_id))
            .await?;
        if existing.is_some() {
            return Err(CrewboardError::board_exists(&self.project_id));
        }

        // Close the race with a concurrent AddBoard for the same project.
        let project_id = self.project_id.clone();
        uow.guard(move |tables| {
            let taken = Board::table(tables)
                .rows()
                .any(|v| v.row.project_id == project_id);
            if taken {
                return Err(StoreError::constraint("project already has a board"));
            }
            Ok(())
        });

        let name = self.name.clone().unwrap_or_else(|| project.name.clone());
        let mut board = Board::new(self.project_id.clone(), name);
        if let Some(description) = &self.description {
            board = board.with_description(description.clone());
        }

        uow.repo::<Board>().insert(board.clone());
        uow.save().await?;

        info!(board_id = %board.id, project_id = %self.project_id, "added board");
        Ok(board)
    }
}
