//! MoveTicket command

use async_trait::async_trait;

use crate::context::CrewboardContext;
use crate::error::Result;
use crate::execute::Execute;
use crate::ticket::UpdateTicket;
use crate::types::{StageId, Ticket, TicketId};

/// Move a ticket to another stage of its board
///
/// Shorthand for [`UpdateTicket`] with only the stage set; the move is
/// recorded in the ticket's history like any other change.
#[derive(Debug)]
pub struct MoveTicket {
    /// Ticket to move
    pub ticket_id: TicketId,
    /// Destination stage; must be on the ticket's board
    pub stage_id: StageId,
    /// Optional note for the history entry
    pub note: Option<String>,
}

impl MoveTicket {
    /// Create a new MoveTicket command
    pub fn new(ticket_id: TicketId, stage_id: StageId) -> Self {
        Self {
            ticket_id,
            stage_id,
            note: None,
        }
    }

    /// Attach a note to the history entry
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[async_trait]
impl Execute for MoveTicket {
    type Output = Ticket;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Ticket> {
        let mut update =
            UpdateTicket::new(self.ticket_id.clone()).with_stage(self.stage_id.clone());
        if let Some(note) = &self.note {
            update = update.with_note(note.clone());
        }
        update.execute(ctx).await
    }
}
