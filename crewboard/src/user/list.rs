//! ListUsers command

use async_trait::async_trait;

use crewboard_query::Page;

use crate::context::CrewboardContext;
use crate::error::Result;
use crate::execute::Execute;
use crate::list_options;
use crate::types::User;

/// List users, optionally sorted and paged
#[derive(Debug, Default)]
pub struct ListUsers {
    /// Sort field, one of `first_name` or `last_name`
    pub sort_by: Option<String>,
    /// Sort direction, `asc` or `desc`
    pub direction: Option<String>,
    /// Page window; inactive pages return everything
    pub page: Option<Page>,
}

impl ListUsers {
    /// Create a new ListUsers command
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort by the given field
    pub fn with_sort(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    /// Set the sort direction
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    /// Return one page of the result
    pub fn with_page(mut self, number: i64, size: i64) -> Self {
        self.page = Some(Page::new(number, size));
        self
    }
}

#[async_trait]
impl Execute for ListUsers {
    type Output = Vec<User>;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Vec<User>> {
        let options = list_options::sort_and_page(&self.sort_by, &self.direction, self.page)?;
        let mut uow = ctx.begin();
        Ok(uow.repo::<User>().list(&options).await?)
    }
}
