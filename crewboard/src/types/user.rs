//! User type and roles

use serde::{Deserialize, Serialize};

use crewboard_query::{SortKey, Sortable};
use crewboard_store::Entity;

use super::ids::UserId;

/// Access role granted to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Member,
}

/// Projection of the external identity subsystem
///
/// Identity and authentication live elsewhere; the store only carries the
/// users other rows reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl User {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            roles: Vec::new(),
        }
    }

    /// Set the full role list
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

impl Entity for User {
    type Id = UserId;

    const KIND: &'static str = "user";

    fn id(&self) -> UserId {
        self.id.clone()
    }
}

impl Sortable for User {
    fn sort_fields() -> &'static [&'static str] {
        &["first_name", "last_name"]
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "first_name" => Some(SortKey::Text(self.first_name.clone())),
            "last_name" => Some(SortKey::Text(self.last_name.clone())),
            _ => None,
        }
    }
}
