//! Group type and its join rows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crewboard_query::{SortKey, Sortable};
use crewboard_store::Entity;

use super::ids::{GroupId, GroupMemberId, GroupProjectId, ProjectId, UserId};

/// A team of users led by a manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub manager_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: impl Into<String>, manager_id: UserId) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            description: String::new(),
            manager_id,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Entity for Group {
    type Id = GroupId;

    const KIND: &'static str = "group";

    fn id(&self) -> GroupId {
        self.id.clone()
    }
}

impl Sortable for Group {
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

/// Membership join row: one user in one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: GroupMemberId,
    pub group_id: GroupId,
    pub user_id: UserId,
}

impl GroupMember {
    pub fn new(group_id: GroupId, user_id: UserId) -> Self {
        Self {
            id: GroupMemberId::new(),
            group_id,
            user_id,
        }
    }
}

impl Entity for GroupMember {
    type Id = GroupMemberId;

    const KIND: &'static str = "group member";

    fn id(&self) -> GroupMemberId {
        self.id.clone()
    }
}

impl Sortable for GroupMember {
    fn sort_fields() -> &'static [&'static str] {
        &[]
    }

    fn sort_key(&self, _field: &str) -> Option<SortKey> {
        None
    }
}

/// Delegation join row: one group attached to one project
///
/// A row exists only after the group was approved for the project; at
/// most one row per (group, project) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupProject {
    pub id: GroupProjectId,
    pub group_id: GroupId,
    pub project_id: ProjectId,
}

impl GroupProject {
    pub fn new(group_id: GroupId, project_id: ProjectId) -> Self {
        Self {
            id: GroupProjectId::new(),
            group_id,
            project_id,
        }
    }
}

impl Entity for GroupProject {
    type Id = GroupProjectId;

    const KIND: &'static str = "group project";

    fn id(&self) -> GroupProjectId {
        self.id.clone()
    }
}

impl Sortable for GroupProject {
    fn sort_fields() -> &'static [&'static str] {
        &[]
    }

    fn sort_key(&self, _field: &str) -> Option<SortKey> {
        None
    }
}
