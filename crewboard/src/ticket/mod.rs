//! Ticket commands

mod add;
mod complete;
mod delete;
mod get;
mod list;
mod mv;
mod update;

pub use add::AddTicket;
pub use complete::CompleteTicket;
pub use delete::DeleteTicket;
pub use get::{GetTicket, TicketWithHistory};
pub use list::ListTickets;
pub use mv::MoveTicket;
pub use update::UpdateTicket;
