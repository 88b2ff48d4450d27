//! ListProjects command

use async_trait::async_trait;

use crewboard_query::Page;

use crate::context::CrewboardContext;
use crate::error::Result;
use crate::execute::Execute;
use crate::list_options;
use crate::types::Project;

/// List projects, optionally sorted and paged
#[derive(Debug, Default)]
pub struct ListProjects {
    /// Sort field, one of `name` or `created_at`
    pub sort_by: Option<String>,
    /// Sort direction, `asc` or `desc`
    pub direction: Option<String>,
    /// Page window; inactive pages return everything
    pub page: Option<Page>,
}

impl ListProjects {
    /// Create a new ListProjects command
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
impl Execute for ListProjects {
    type Output = Vec<Project>;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Vec<Project>> {
        let options = list_options::sort_and_page(&self.sort_by, &self.direction, self.page)?;
        let mut uow = ctx.begin();
        Ok(uow.repo::<Project>().list(&options).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn test_list_projects_sorted_by_name() {
        let ctx = test_support::ctx().await;
        test_support::seed_project(&ctx, "Borealis").await;
        test_support::seed_project(&ctx, "Atlas").await;

        let projects = ListProjects::new()
            .with_sort("name")
            .execute(&ctx)
            .await
            .unwrap();

        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Atlas", "Borealis"]);
    }

    #[tokio::test]
    async fn test_list_projects_page_window() {
        let ctx = test_support::ctx().await;
        for name in ["Atlas", "Borealis", "Castor", "Deimos"] {
            test_support::seed_project(&ctx, name).await;
        }

        let projects = ListProjects::new()
            .with_sort("name")
            .with_page(2, 2)
            .execute(&ctx)
            .await
            .unwrap();

        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Castor", "Deimos"]);
    }
}
