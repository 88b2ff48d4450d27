//! UpdateTicket command

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crewboard_query::QueryOptions;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{BoardStage, StageId, Ticket, TicketHistory, TicketId, TrackedField, User, UserId};

/// Update fields of a ticket, recording each change in the history ledger
///
/// Only fields that are set and actually differ from the stored value are
/// touched; an update that changes nothing writes nothing, not even a
/// version bump. Every field changed in one call shares one timestamp and
/// the optional note.
#[derive(Debug)]
pub struct UpdateTicket {
    /// Ticket to update
    pub ticket_id: TicketId,
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New assignee; the inner `None` clears the assignment
    pub assigned_to: Option<Option<UserId>>,
    /// Stage to move the ticket to; must be on the ticket's board
    pub stage_id: Option<StageId>,
    /// New completion flag
    pub completed: Option<bool>,
    /// Note attached to every history entry this update writes
    pub note: Option<String>,
}

impl UpdateTicket {
    /// Create a new UpdateTicket command that changes nothing yet
    pub fn new(ticket_id: TicketId) -> Self {
        Self {
            ticket_id,
            title: None,
            description: None,
            assigned_to: None,
            stage_id: None,
            completed: None,
            note: None,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the assignee; pass `None` to clear the assignment
    pub fn with_assignee(mut self, assigned_to: Option<UserId>) -> Self {
        self.assigned_to = Some(assigned_to);
        self
    }

    /// Move the ticket to another stage of its board
    pub fn with_stage(mut self, stage_id: StageId) -> Self {
        self.stage_id = Some(stage_id);
        self
    }

    /// Set the completion flag
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Attach a note to the history entries this update writes
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    fn change(
        &self,
        ctx: &CrewboardContext,
        at: DateTime<Utc>,
        property: TrackedField,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> TicketHistory {
        let mut entry = TicketHistory::new(
            self.ticket_id.clone(),
            property,
            old_value,
            new_value,
            ctx.user_id().clone(),
            at,
        );
        if let Some(note) = &self.note {
            entry = entry.with_note(note.clone());
        }
        entry
    }
}

/// History representation of a free-text field; empty means unset
fn text_value(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[async_trait]
impl Execute for UpdateTicket {
    type Output = Ticket;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Ticket> {
        let mut uow = ctx.begin();

        let mut ticket = uow
            .repo::<Ticket>()
            .get_by_id(&self.ticket_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("ticket", &self.ticket_id))?;

        let now = Utc::now();
        let mut changes = Vec::new();

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(CrewboardError::invalid_value("title", "must not be empty"));
            }
            if *title != ticket.title {
                changes.push(self.change(
                    ctx,
                    now,
                    TrackedField::Title,
                    Some(ticket.title.clone()),
                    Some(title.clone()),
                ));
                ticket.title = title.clone();
            }
        }

        if let Some(description) = &self.description {
            if *description != ticket.description {
                changes.push(self.change(
                    ctx,
                    now,
                    TrackedField::Description,
                    text_value(&ticket.description),
                    text_value(description),
                ));
                ticket.description = description.clone();
            }
        }

        if let Some(assigned_to) = &self.assigned_to {
            if let Some(user_id) = assigned_to {
                uow.repo::<User>()
                    .get_by_id(user_id)
                    .await
                    .ok_or_else(|| CrewboardError::not_found("user", user_id))?;
            }
            if *assigned_to != ticket.assigned_to {
                changes.push(self.change(
                    ctx,
                    now,
                    TrackedField::AssignedTo,
                    ticket.assigned_to.as_ref().map(|u| u.to_string()),
                    assigned_to.as_ref().map(|u| u.to_string()),
                ));
                ticket.assigned_to = assigned_to.clone();
            }
        }

        if let Some(stage_id) = &self.stage_id {
            if *stage_id != ticket.stage_id {
                let board_id = ticket.board_id.clone();
                let target = stage_id.clone();
                let placed = uow
                    .repo::<BoardStage>()
                    .get(
                        &QueryOptions::new().with_filter(move |l: &BoardStage| {
                            l.board_id == board_id && l.stage_id == target
                        }),
                    )
                    .await?;
                if placed.is_none() {
                    return Err(CrewboardError::invalid_value(
                        "stage_id",
                        "stage is not on this board",
                    ));
                }
                changes.push(self.change(
                    ctx,
                    now,
                    TrackedField::Stage,
                    Some(ticket.stage_id.to_string()),
                    Some(stage_id.to_string()),
                ));
                ticket.stage_id = stage_id.clone();
            }
        }

        if let Some(completed) = self.completed {
            if completed != ticket.completed {
                changes.push(self.change(
                    ctx,
                    now,
                    TrackedField::Completed,
                    Some(ticket.completed.to_string()),
                    Some(completed.to_string()),
                ));
                ticket.completed = completed;
            }
        }

        if changes.is_empty() {
            return Ok(ticket);
        }

        let entries = changes.len();
        uow.repo::<Ticket>().update(ticket.clone()).await?;
        for change in changes {
            uow.repo::<TicketHistory>().insert(change);
        }
        uow.save().await?;

        info!(ticket_id = %self.ticket_id, entries, "updated ticket");
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support;
    use crate::ticket::{AddTicket, GetTicket};

    #[tokio::test]
    async fn test_update_ticket_records_field_changes() {
        let ctx = test_support::ctx().await;
        let pipeline = test_support::seed_pipeline(&ctx).await;
        let ticket = AddTicket::new(pipeline.board.id.clone(), "Fix login")
            .execute(&ctx)
            .await
            .unwrap();

        let updated = UpdateTicket::new(ticket.id.clone())
            .with_title("Fix login flow")
            .with_note("clarified with support")
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(updated.title, "Fix login flow");

        let fetched = GetTicket::new(ticket.id.clone()).execute(&ctx).await.unwrap();
        assert_eq!(fetched.history.len(), 1);
        let entry = &fetched.history[0];
        assert_eq!(entry.property, TrackedField::Title);
        assert_eq!(entry.old_value.as_deref(), Some("Fix login"));
        assert_eq!(entry.new_value.as_deref(), Some("Fix login flow"));
        assert_eq!(entry.note, "clarified with support");
        assert_eq!(&entry.changed_by, ctx.user_id());
    }

    #[tokio::test]
    async fn test_update_ticket_without_changes_writes_no_history() {
        let ctx = test_support::ctx().await;
        let pipeline = test_support::seed_pipeline(&ctx).await;
        let ticket = AddTicket::new(pipeline.board.id.clone(), "Fix login")
            .execute(&ctx)
            .await
            .unwrap();

        UpdateTicket::new(ticket.id.clone())
            .with_title("Fix login")
            .with_completed(false)
            .execute(&ctx)
            .await
            .unwrap();

        let fetched = GetTicket::new(ticket.id.clone()).execute(&ctx).await.unwrap();
        assert!(fetched.history.is_empty());
    }

    #[tokio::test]
    async fn test_update_ticket_assignment_round_trip() {
        let ctx = test_support::ctx().await;
        let pipeline = test_support::seed_pipeline(&ctx).await;
        let grace = test_support::seed_user(&ctx, "Grace", "Hopper").await;
        let ticket = AddTicket::new(pipeline.board.id.clone(), "Fix login")
            .execute(&ctx)
            .await
            .unwrap();

        let assigned = UpdateTicket::new(ticket.id.clone())
            .with_assignee(Some(grace.id.clone()))
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(assigned.assigned_to, Some(grace.id.clone()));

        let cleared = UpdateTicket::new(ticket.id.clone())
            .with_assignee(None)
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(cleared.assigned_to, None);

        let fetched = GetTicket::new(ticket.id.clone()).execute(&ctx).await.unwrap();
        assert_eq!(fetched.history.len(), 2);
        assert_eq!(fetched.history[0].old_value, None);
        assert_eq!(
            fetched.history[0].new_value.as_deref(),
            Some(grace.id.as_str())
        );
        assert_eq!(
            fetched.history[1].old_value.as_deref(),
            Some(grace.id.as_str())
        );
        assert_eq!(fetched.history[1].new_value, None);
    }

    #[tokio::test]
    async fn test_update_ticket_rejects_stage_off_the_board() {
        let ctx = test_support::ctx().await;
        let pipeline = test_support::seed_pipeline(&ctx).await;
        let ticket = AddTicket::new(pipeline.board.id.clone(), "Fix login")
            .execute(&ctx)
            .await
            .unwrap();

        let err = UpdateTicket::new(ticket.id.clone())
            .with_stage(StageId::new())
            .execute(&ctx)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_update_ticket_unknown_assignee() {
        let ctx = test_support::ctx().await;
        let pipeline = test_support::seed_pipeline(&ctx).await;
        let ticket = AddTicket::new(pipeline.board.id.clone(), "Fix login")
            .execute(&ctx)
            .await
            .unwrap();

        let err = UpdateTicket::new(ticket.id.clone())
            .with_assignee(Some(UserId::new()))
            .execute(&ctx)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_missing_ticket() {
        let ctx = test_support::ctx().await;

        let err = UpdateTicket::new(TicketId::new())
            .with_title("Ghost")
            .execute(&ctx)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
