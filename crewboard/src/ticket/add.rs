//! AddTicket command

use async_trait::async_trait;
use tracing::info;

use crewboard_query::{QueryOptions, Sort};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Board, BoardId, BoardStage, StageId, Ticket, User, UserId};

/// Add a ticket to a board
///
/// The ticket lands in the given stage, or in the board's first stage
/// when none is given. Creation writes no history; the ledger records
/// changes only.
#[derive(Debug)]
pub struct AddTicket {
    /// Board the ticket belongs to
    pub board_id: BoardId,
    /// Ticket title
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Stage to place the ticket in; defaults to the first stage
    pub stage_id: Option<StageId>,
    /// Optional initial assignee
    pub assigned_to: Option<UserId>,
}

impl AddTicket {
    /// Create a new AddTicket command
    pub fn new(board_id: BoardId, title: impl Into<String>) -> Self {
        Self {
            board_id,
            title: title.into(),
            description: None,
            stage_id: None,
            assigned_to: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Place the ticket in a specific stage
    pub fn with_stage(mut self, stage_id: StageId) -> Self {
        self.stage_id = Some(stage_id);
        self
    }

    /// Assign the ticket on creation
    pub fn with_assignee(mut self, assigned_to: UserId) -> Self {
        self.assigned_to = Some(assigned_to);
        self
    }
}

#[async_trait]
impl Execute for AddTicket {
    type Output = Ticket;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Ticket> {
        if self.title.trim().is_empty() {
            return Err(CrewboardError::invalid_value("title", "must not be empty"));
        }

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

        let stage_id = match &self.stage_id {
            Some(stage_id) => {
                if !links.iter().any(|l| l.stage_id == *stage_id) {
                    return Err(CrewboardError::invalid_value(
                        "stage_id",
                        "stage is not on this board",
                    ));
                }
                stage_id.clone()
            }
            None => links
                .first()
                .map(|l| l.stage_id.clone())
                .ok_or_else(|| CrewboardError::invalid_value("stage_id", "board has no stages"))?,
        };

        if let Some(assignee) = &self.assigned_to {
            uow.repo::<User>()
                .get_by_id(assignee)
                .await
                .ok_or_else(|| CrewboardError::not_found("user", assignee))?;
        }

        let mut ticket = Ticket::new(
            self.board_id.clone(),
            stage_id,
            self.title.clone(),
            ctx.user_id().clone(),
        );
        if let Some(description) = &self.description {
            ticket = ticket.with_description(description.clone());
        }
        if let Some(assignee) = &self.assigned_to {
            ticket = ticket.with_assignee(assignee.clone());
        }

        uow.repo::<Ticket>().insert(ticket.clone());
        uow.save().await?;

        info!(ticket_id = %ticket.id, board_id = %self.board_id, "added ticket");
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support;

    #[tokio::test]
    async fn test_add_ticket_defaults_to_first_stage() {
        let ctx = test_support::ctx().await;
        let pipeline = test_support::seed_pipeline(&ctx).await;

        let ticket = AddTicket::new(pipeline.board.id.clone(), "Fix login")
            .with_description("500 on POST /login")
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(ticket.stage_id, pipeline.todo.stage_id);
        assert_eq!(&ticket.created_by, ctx.user_id());
        assert!(!ticket.completed);
        assert!(ticket.assigned_to.is_none());
    }

    #[tokio::test]
    async fn test_add_ticket_into_chosen_stage() {
        let ctx = test_support::ctx().await;
        let pipeline = test_support::seed_pipeline(&ctx).await;

        let ticket = AddTicket::new(pipeline.board.id.clone(), "Fix login")
            .with_stage(pipeline.doing.stage_id.clone())
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(ticket.stage_id, pipeline.doing.stage_id);
    }

    #[tokio::test]
    async fn test_add_ticket_rejects_foreign_stage() {
        let ctx = test_support::ctx().await;
        let pipeline = test_support::seed_pipeline(&ctx).await;

        let err = AddTicket::new(pipeline.board.id.clone(), "Fix login")
            .with_stage(StageId::new())
            .execute(&ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, CrewboardError::InvalidValue { .. }));
    }

    #[tokio::test]
    async fn test_add_ticket_requires_a_stage_on_the_board() {
        let ctx = test_support::ctx().await;
        let project = test_support::seed_project(&ctx, "Atlas").await;
        let board = test_support::seed_board(&ctx, &project).await;

        let err = AddTicket::new(board.id.clone(), "Fix login")
            .execute(&ctx)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_add_ticket_with_assignee() {
        let ctx = test_support::ctx().await;
        let pipeline = test_support::seed_pipeline(&ctx).await;
        let grace = test_support::seed_user(&ctx, "Grace", "Hopper").await;

        let ticket = AddTicket::new(pipeline.board.id.clone(), "Fix login")
            .with_assignee(grace.id.clone())
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(ticket.assigned_to, Some(grace.id));
    }

    #[tokio::test]
    async fn test_add_ticket_unknown_assignee() {
        let ctx = test_support::ctx().await;
        let pipeline = test_support::seed_pipeline(&ctx).await;

        let err = AddTicket::new(pipeline.board.id.clone(), "Fix login")
            .with_assignee(UserId::new())
            .execute(&ctx)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
