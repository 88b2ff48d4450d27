//! ULID-backed identifier newtypes
//!
//! Ids are lexicographically sortable strings, so id order is creation
//! order and tables iterating by id stay deterministic.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new identifier
            pub fn new() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Wrap an existing identifier string
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

id_type!(
    /// Identifies a user
    UserId
);
id_type!(
    /// Identifies a project
    ProjectId
);
id_type!(
    /// Identifies a group
    GroupId
);
id_type!(
    /// Identifies a group membership row
    GroupMemberId
);
id_type!(
    /// Identifies a group-to-project delegation row
    GroupProjectId
);
id_type!(
    /// Identifies a board
    BoardId
);
id_type!(
    /// Identifies a reusable stage definition
    StageId
);
id_type!(
    /// Identifies a stage's placement on a board
    BoardStageId
);
id_type!(
    /// Identifies a ticket
    TicketId
);
id_type!(
    /// Identifies one ticket history entry
    TicketHistoryId
);
id_type!(
    /// Identifies a group approval request
    ApprovalRequestId
);
