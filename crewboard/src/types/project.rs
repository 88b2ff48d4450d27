//! Project type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crewboard_query::{SortKey, Sortable};
use crewboard_store::Entity;

use super::ids::{ProjectId, UserId};

/// A tracked project
///
/// Work on a project is delegated to groups; which groups may be attached
/// is governed by the approval workflow, recorded as `GroupProject` rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// User accountable for the project
    pub lead_id: UserId,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>, lead_id: UserId, created_by: UserId) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            description: String::new(),
            lead_id,
            created_by,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Entity for Project {
    type Id = ProjectId;

    const KIND: &'static str = "project";

    fn id(&self) -> ProjectId {
        self.id.clone()
    }
}

impl Sortable for Project {
    fn sort_fields() -> &'static [&'static str] {
        &["name", "created_at"]
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "name" => Some(SortKey::Text(self.name.clone())),
            "created_at" => Some(SortKey::Time(self.created_at)),
            _ => None,
        }
    }
}
