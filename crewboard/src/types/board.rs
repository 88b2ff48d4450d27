//! Board, stage definitions, and stage placements

use serde::{Deserialize, Serialize};

use crewboard_query::{SortKey, Sortable};
use crewboard_store::Entity;

use super::ids::{BoardId, BoardStageId, GroupId, ProjectId, StageId};

/// The kanban surface of one project
///
/// Exactly one board exists per configured project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub project_id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Board {
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id: BoardId::new(),
            project_id,
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Entity for Board {
    type Id = BoardId;

    const KIND: &'static str = "board";

    fn id(&self) -> BoardId {
        self.id.clone()
    }
}

impl Sortable for Board {
    fn sort_fields() -> &'static [&'static str] {
        &["name"]
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "name" => Some(SortKey::Text(self.name.clone())),
            _ => None,
        }
    }
}

/// A named pipeline step, reusable across boards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub name: String,
}

impl Stage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: StageId::new(),
            name: name.into(),
        }
    }
}

impl Entity for Stage {
    type Id = StageId;

    const KIND: &'static str = "stage";

    fn id(&self) -> StageId {
        self.id.clone()
    }
}

impl Sortable for Stage {
    fn sort_fields() -> &'static [&'static str] {
        &["name"]
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "name" => Some(SortKey::Text(self.name.clone())),
            _ => None,
        }
    }
}

/// Ordered, group-owned placement of a stage on a board
///
/// Orders within one board are unique and contiguous starting at 1; at
/// most one placement exists per (board, stage) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardStage {
    pub id: BoardStageId,
    pub board_id: BoardId,
    pub stage_id: StageId,
    /// Group responsible for tickets sitting in this stage
    pub group_id: GroupId,
    /// 1-based position in the pipeline
    pub order: u32,
}

impl BoardStage {
    pub fn new(board_id: BoardId, stage_id: StageId, group_id: GroupId, order: u32) -> Self {
        Self {
            id: BoardStageId::new(),
            board_id,
            stage_id,
            group_id,
            order,
        }
    }
}

impl Entity for BoardStage {
    type Id = BoardStageId;

    const KIND: &'static str = "board stage";

    fn id(&self) -> BoardStageId {
        self.id.clone()
    }
}

impl Sortable for BoardStage {
    fn sort_fields() -> &'static [&'static str] {
        &["order"]
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "order" => Some(self.order.into()),
            _ => None,
        }
    }
}
