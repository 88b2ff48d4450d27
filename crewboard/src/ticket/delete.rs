//! DeleteTicket command

use async_trait::async_trait;
use tracing::info;

use crewboard_query::QueryOptions;

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Ticket, TicketHistory, TicketId};

/// Delete a ticket together with its history
///
/// History rows live and die with their ticket; this is the only
/// operation that removes entries from the ledger.
#[derive(Debug)]
pub struct DeleteTicket {
    /// Ticket to delete
    pub ticket_id: TicketId,
}

impl DeleteTicket {
    /// Create a new DeleteTicket command
    pub fn new(ticket_id: TicketId) -> Self {
        Self { ticket_id }
    }
}

#[async_trait]
impl Execute for DeleteTicket {
    type Output = ();

    async fn execute(&self, ctx: &CrewboardContext) -> Result<()> {
        let mut uow = ctx.begin();

        let ticket = uow
            .repo::<Ticket>()
            .get_by_id(&self.ticket_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("ticket", &self.ticket_id))?;

        let ticket_id = self.ticket_id.clone();
        let history = uow
            .repo::<TicketHistory>()
            .list(&QueryOptions::new().with_filter(move |h: &TicketHistory| h.ticket_id == ticket_id))
            .await?;

        let entries = history.len();
        for entry in &history {
            uow.repo::<TicketHistory>().delete(entry).await?;
        }
        uow.repo::<Ticket>().delete(&ticket).await?;
        uow.save().await?;

        info!(ticket_id = %self.ticket_id, entries, "deleted ticket");
        Ok(())
    }
}
