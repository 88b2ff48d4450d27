//! Shared fixtures for command tests
//!
//! Every fixture goes through the public commands, so the seeded rows
//! look exactly like rows produced by real use.

use crate::board::AddBoard;
use crate::context::{CrewboardContext, Session};
use crate::execute::Execute;
use crate::group::AddGroup;
use crate::project::AddProject;
use crate::stage::AddStage;
use crate::types::{Board, BoardStage, Group, Project, Role, User, UserId};
use crate::user::AddUser;

/// In-memory context acting as a freshly created admin named Ada Admin
pub(crate) async fn ctx() -> CrewboardContext {
    let boot = CrewboardContext::in_memory(Session::new(UserId::new()));
    let admin = AddUser::new("Ada", "Admin")
        .with_roles(vec![Role::Admin])
        .execute(&boot)
        .await
        .unwrap();
    boot.with_session(Session::new(admin.id))
}

pub(crate) async fn seed_user(ctx: &CrewboardContext, first: &str, last: &str) -> User {
    AddUser::new(first, last).execute(ctx).await.unwrap()
}

pub(crate) async fn seed_project(ctx: &CrewboardContext, name: &str) -> Project {
    AddProject::new(name).execute(ctx).await.unwrap()
}

pub(crate) async fn seed_group(ctx: &CrewboardContext, name: &str) -> Group {
    AddGroup::new(name).execute(ctx).await.unwrap()
}

pub(crate) async fn seed_board(ctx: &CrewboardContext, project: &Project) -> Board {
    AddBoard::new(project.id.clone()).execute(ctx).await.unwrap()
}

/// A board for project "Atlas" with stages Todo, Doing, Done owned by
/// group "Platform"
pub(crate) struct Pipeline {
    pub board: Board,
    pub group: Group,
    pub todo: BoardStage,
    pub doing: BoardStage,
    pub done: BoardStage,
}

pub(crate) async fn seed_pipeline(ctx: &CrewboardContext) -> Pipeline {
    let project = seed_project(ctx, "Atlas").await;
    let board = seed_board(ctx, &project).await;
    let group = seed_group(ctx, "Platform").await;
    let todo = AddStage::new(board.id.clone(), "Todo", group.id.clone())
        .execute(ctx)
        .await
        .unwrap();
    let doing = AddStage::new(board.id.clone(), "Doing", group.id.clone())
        .execute(ctx)
        .await
        .unwrap();
    let done = AddStage::new(board.id.clone(), "Done", group.id.clone())
        .execute(ctx)
        .await
        .unwrap();
    Pipeline {
        board,
        group,
        todo,
        doing,
        done,
    }
}
