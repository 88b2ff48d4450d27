//! Tickets and their append-only change history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crewboard_query::{SortKey, Sortable};
use crewboard_store::Entity;

use super::ids::{BoardId, StageId, TicketHistoryId, TicketId, UserId};

/// A trackable unit of work moving through a board's stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub board_id: BoardId,
    /// Current stage; always resolves to a placement on `board_id`
    pub stage_id: StageId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,
    #[serde(default)]
    pub completed: bool,
}

impl Ticket {
    pub fn new(
        board_id: BoardId,
        stage_id: StageId,
        title: impl Into<String>,
        created_by: UserId,
    ) -> Self {
        Self {
            id: TicketId::new(),
            board_id,
            stage_id,
            title: title.into(),
            description: String::new(),
            created_by,
            created_at: Utc::now(),
            assigned_to: None,
            completed: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assigned_to = Some(assignee);
        self
    }
}

impl Entity for Ticket {
    type Id = TicketId;

    const KIND: &'static str = "ticket";

    fn id(&self) -> TicketId {
        self.id.clone()
    }
}

impl Sortable for Ticket {
    fn sort_fields() -> &'static [&'static str] {
        &["title", "created_at", "completed", "assigned_to"]
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "title" => Some(SortKey::Text(self.title.clone())),
            "created_at" => Some(SortKey::Time(self.created_at)),
            "completed" => Some(SortKey::Bool(self.completed)),
            // Unassigned tickets sort before assigned ones when ascending.
            "assigned_to" => self.assigned_to.as_ref().map(|u| SortKey::Text(u.to_string())),
            _ => None,
        }
    }
}

/// Ticket fields whose changes are recorded in the history ledger
///
/// Serialized names are part of the persisted contract; variant names
/// serialize as-is, so the assignee property round-trips as
/// `"AssignedTo"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackedField {
    Title,
    Description,
    AssignedTo,
    Stage,
    Completed,
}

impl TrackedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::AssignedTo => "AssignedTo",
            Self::Stage => "Stage",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for TrackedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable audit record of one field change on a ticket
///
/// History rows are append-only: once written they are never mutated, and
/// they are removed only when their ticket is deleted. `old_value` and
/// `new_value` hold the raw value as a string; `None` means unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketHistory {
    pub id: TicketHistoryId,
    pub ticket_id: TicketId,
    pub property: TrackedField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    pub changed_by: UserId,
    pub changed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

impl TicketHistory {
    pub fn new(
        ticket_id: TicketId,
        property: TrackedField,
        old_value: Option<String>,
        new_value: Option<String>,
        changed_by: UserId,
        changed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TicketHistoryId::new(),
            ticket_id,
            property,
            old_value,
            new_value,
            changed_by,
            changed_at,
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

impl Entity for TicketHistory {
    type Id = TicketHistoryId;

    const KIND: &'static str = "ticket history entry";

    fn id(&self) -> TicketHistoryId {
        self.id.clone()
    }
}

impl Sortable for TicketHistory {
    fn sort_fields() -> &'static [&'static str] {
        &["changed_at"]
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "changed_at" => Some(SortKey::Time(self.changed_at)),
            _ => None,
        }
    }
}
