//! Table layout of the crewboard database.

use serde::{Deserialize, Serialize};

use crewboard_store::{Schema, Stored, Table};

use crate::types::{
    Board, BoardStage, Group, GroupApprovalRequest, GroupMember, GroupProject, Project, Stage,
    Ticket, TicketHistory, User,
};

/// Every table in a crewboard store.
///
/// Tables missing from a stored file deserialize as empty, so files written
/// before a table existed stay readable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default)]
    users: Table<User>,
    #[serde(default)]
    projects: Table<Project>,
    #[serde(default)]
    groups: Table<Group>,
    #[serde(default)]
    group_members: Table<GroupMember>,
    #[serde(default)]
    group_projects: Table<GroupProject>,
    #[serde(default)]
    boards: Table<Board>,
    #[serde(default)]
    stages: Table<Stage>,
    #[serde(default)]
    board_stages: Table<BoardStage>,
    #[serde(default)]
    tickets: Table<Ticket>,
    #[serde(default)]
    ticket_history: Table<TicketHistory>,
    #[serde(default)]
    approval_requests: Table<GroupApprovalRequest>,
}

impl Schema for Tables {}

macro_rules! stored {
    ($entity:ty, $field:ident) => {
        impl Stored<Tables> for $entity {
            fn table(schema: &Tables) -> &Table<Self> {
                &schema.$field
            }

            fn table_mut(schema: &mut Tables) -> &mut Table<Self> {
                &mut schema.$field
            }
        }
    };
}

stored!(User, users);
stored!(Project, projects);
stored!(Group, groups);
stored!(GroupMember, group_members);
stored!(GroupProject, group_projects);
stored!(Board, boards);
stored!(Stage, stages);
stored!(BoardStage, board_stages);
stored!(Ticket, tickets);
stored!(TicketHistory, ticket_history);
stored!(GroupApprovalRequest, approval_requests);
