//! Command execution trait

use async_trait::async_trait;

use crate::context::CrewboardContext;
use crate::error::Result;

/// A crewboard command.
///
/// Commands are plain structs carrying their input. Executing one opens a
/// unit of work on the context's store, applies the change, and returns the
/// command's output.
#[async_trait]
pub trait Execute {
    /// Value produced by a successful execution
    type Output;

    /// Run the command against the given context
    async fn execute(&self, ctx: &CrewboardContext) -> Result<Self::Output>;
}
