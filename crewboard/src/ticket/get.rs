//! GetTicket command

use async_trait::async_trait;
use serde::Serialize;

use crewboard_query::{QueryOptions, Sort};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Ticket, TicketHistory, TicketId};

/// A ticket together with its change history, oldest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketWithHistory {
    pub ticket: Ticket,
    pub history: Vec<TicketHistory>,
}

/// Fetch one ticket and its history by id
#[derive(Debug)]
pub struct GetTicket {
    /// Ticket to fetch
    pub ticket_id: TicketId,
}

impl GetTicket {
    /// Create a new GetTicket command
    pub fn new(ticket_id: TicketId) -> Self {
        Self { ticket_id }
    }
}

#[async_trait]
impl Execute for GetTicket {
    type Output = TicketWithHistory;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<TicketWithHistory> {
        let mut uow = ctx.begin();

        let ticket = uow
            .repo::<Ticket>()
            .get_by_id(&self.ticket_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("ticket", &self.ticket_id))?;

        let ticket_id = self.ticket_id.clone();
        let history = uow
            .repo::<TicketHistory>()
            .list(
                &QueryOptions::new()
                    .with_filter(move |h: &TicketHistory| h.ticket_id == ticket_id)
                    .with_sort(Sort::asc("changed_at")),
            )
            .await?;

        Ok(TicketWithHistory { ticket, history })
    }
}
