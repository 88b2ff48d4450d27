//! CompleteTicket command

use async_trait::async_trait;

use crate::context::CrewboardContext;
use crate::error::Result;
use crate::execute::Execute;
use crate::ticket::UpdateTicket;
use crate::types::{Ticket, TicketId};

/// Mark a ticket completed
///
/// Shorthand for [`UpdateTicket`] with only the completion flag set. The
/// ticket stays in its stage; completing an already completed ticket is a
/// no-op.
#[derive(Debug)]
pub struct CompleteTicket {
    /// Ticket to complete
    pub ticket_id: TicketId,
    /// Optional note for the history entry
    pub note: Option<String>,
}

impl CompleteTicket {
    /// Create a new CompleteTicket command
    pub fn new(ticket_id: TicketId) -> Self {
        Self {
            ticket_id,
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
impl Execute for CompleteTicket {
    type Output = Ticket;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Ticket> {
        let mut update = UpdateTicket::new(self.ticket_id.clone()).with_completed(true);
        if let Some(note) = &self.note {
            update = update.with_note(note.clone());
        }
        update.execute(ctx).await
    }
}
