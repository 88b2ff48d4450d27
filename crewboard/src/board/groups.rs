//! ListStageGroups command

use async_trait::async_trait;
use serde::Serialize;

use crewboard_query::{QueryOptions, Sort};

use crate::context::CrewboardContext;
use crate::error::{CrewboardError, Result};
use crate::execute::Execute;
use crate::types::{Board, BoardId, BoardStage, Group, GroupId, Stage, StageId};

/// One stage placement with its stage and owning group resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageGroup {
    pub stage_id: StageId,
    pub stage_name: String,
    pub group_id: GroupId,
    pub group_name: String,
    /// 1-based position in the pipeline
    pub order: u32,
}

/// List which group owns each stage of a board, in pipeline order
#[derive(Debug)]
pub struct ListStageGroups {
    /// Board whose stage ownership to list
    pub board_id: BoardId,
}

impl ListStageGroups {
    /// Create a new ListStageGroups command
    pub fn new(board_id: BoardId) -> Self {
        Self { board_id }
    }
}

#[async_trait]
impl Execute for ListStageGroups {
    type Output = Vec<StageGroup>;

    async fn execute(&self, ctx: &CrewboardContext) -> Result<Vec<StageGroup>> {
        let mut uow = ctx.begin();

        uow.repo::<Board>()
            .get_by_id(&self.board_id)
            .await
            .ok_or_else(|| CrewboardError::not_found("board", &self.board_id))?;

        let board_id = self.board_id.clone();
        let links = uow
            .repo::<BoardStage>()
            .list(
                &QueryOptions::new()
                    .with_filter(move |s: &BoardStage| s.board_id == board_id)
                    .with_sort(Sort::asc("order")),
            )
            .await?;

        let mut out = Vec::with_capacity(links.len());
        for link in links {
            let stage = uow
                .repo::<Stage>()
                .get_by_id(&link.stage_id)
                .await
                .ok_or_else(|| CrewboardError::not_found("stage", &link.stage_id))?;
            let group = uow
                .repo::<Group>()
                .get_by_id(&link.group_id)
                .await
                .ok_or_else(|| CrewboardError::not_found("group", &link.group_id))?;
            out.push(StageGroup {
                stage_id: stage.id,
                stage_name: stage.name,
                group_id: group.id,
                group_name: group.name,
                order: link.order,
            });
        }
        Ok(out)
    }
}
