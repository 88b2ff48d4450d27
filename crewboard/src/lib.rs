//! Kanban style project tracking over a single JSON document store
//!
//! Crewboard models projects that are delegated to groups through an
//! approval workflow. Each project carries one board whose ordered
//! stages are owned by groups, and tickets on the board keep an
//! append-only history of every field change.
//!
//! All behavior lives in command structs that implement [`Execute`].
//! A command validates against current rows and stages its writes, then
//! commits everything as one unit of work; a failed command leaves no
//! partial state behind.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use crewboard::project::AddProject;
//! use crewboard::types::UserId;
//! use crewboard::{CrewboardContext, Execute, Session};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::new(UserId::new());
//! let ctx = CrewboardContext::open("crewboard.json", session).await?;
//!
//! let project = AddProject::new("Atlas")
//!     .with_description("Track the Atlas rollout")
//!     .execute(&ctx)
//!     .await?;
//! println!("created project {}", project.id);
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod execute;
mod list_options;
mod schema;

pub mod approval;
pub mod board;
pub mod group;
pub mod project;
pub mod stage;
pub mod ticket;
pub mod types;
pub mod user;

pub use context::{CrewboardContext, Session};
pub use error::{CrewboardError, ErrorKind, Result};
pub use execute::Execute;
pub use schema::Tables;

#[cfg(test)]
pub(crate) mod test_support;
