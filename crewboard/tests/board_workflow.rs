//! End to end board setup: one board per project, ordered stages, and
//! the group approval workflow.

use crewboard::approval::{ApproveGroup, RequestGroupApproval};
use crewboard::board::{AddBoard, GetBoard};
use crewboard::group::AddGroup;
use crewboard::project::{AddProject, ListProjectGroups};
use crewboard::stage::{AddStage, ReorderStages};
use crewboard::types::{Role, UserId};
use crewboard::user::AddUser;
use crewboard::{CrewboardContext, ErrorKind, Execute, Session};

async fn admin_ctx() -> CrewboardContext {
    let boot = CrewboardContext::in_memory(Session::new(UserId::new()));
    let admin = AddUser::new("Ada", "Admin")
        .with_roles(vec![Role::Admin])
        .execute(&boot)
        .await
        .unwrap();
    boot.with_session(Session::new(admin.id))
}

#[tokio::test]
async fn test_each_project_gets_exactly_one_board() {
    let ctx = admin_ctx().await;
    let project = AddProject::new("Atlas").execute(&ctx).await.unwrap();

    let board = AddBoard::new(project.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    assert_eq!(board.name, "Atlas");

    let err = AddBoard::new(project.id.clone())
        .with_name("Second board")
        .execute(&ctx)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn test_stages_take_consecutive_orders() {
    let ctx = admin_ctx().await;
    let project = AddProject::new("Atlas").execute(&ctx).await.unwrap();
    let board = AddBoard::new(project.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    let group = AddGroup::new("Platform").execute(&ctx).await.unwrap();

    let todo = AddStage::new(board.id.clone(), "Todo", group.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    let doing = AddStage::new(board.id.clone(), "Doing", group.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    let done = AddStage::new(board.id.clone(), "Done", group.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    assert_eq!((todo.order, doing.order, done.order), (1, 2, 3));

    let view = GetBoard::new(board.id.clone()).execute(&ctx).await.unwrap();
    assert_eq!(view.board.id, board.id);
    let ids: Vec<_> = view.stages.iter().map(|s| s.id.clone()).collect();
    assert_eq!(ids, vec![todo.id, doing.id, done.id]);
}

#[tokio::test]
async fn test_reorder_reverses_the_pipeline() {
    let ctx = admin_ctx().await;
    let project = AddProject::new("Atlas").execute(&ctx).await.unwrap();
    let board = AddBoard::new(project.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    let group = AddGroup::new("Platform").execute(&ctx).await.unwrap();
    let todo = AddStage::new(board.id.clone(), "Todo", group.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    let doing = AddStage::new(board.id.clone(), "Doing", group.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    let done = AddStage::new(board.id.clone(), "Done", group.id.clone())
        .execute(&ctx)
        .await
        .unwrap();

    let mut last = todo.clone();
    let mut first = done.clone();
    last.order = 3;
    first.order = 1;

    ReorderStages::new(board.id.clone(), vec![last, doing.clone(), first])
        .execute(&ctx)
        .await
        .unwrap();

    let view = GetBoard::new(board.id.clone()).execute(&ctx).await.unwrap();
    let ids: Vec<_> = view.stages.iter().map(|s| s.id.clone()).collect();
    assert_eq!(ids, vec![done.id, doing.id, todo.id]);
    let orders: Vec<_> = view.stages.iter().map(|s| s.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_approval_attaches_the_group_exactly_once() {
    let ctx = admin_ctx().await;
    let project = AddProject::new("Atlas").execute(&ctx).await.unwrap();
    let group = AddGroup::new("Platform").execute(&ctx).await.unwrap();

    RequestGroupApproval::new(project.id.clone(), group.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    let attached = ListProjectGroups::new(project.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    assert!(attached.is_empty());

    ApproveGroup::new(project.id.clone(), group.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    let attached = ListProjectGroups::new(project.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].id, group.id);

    // A resolved pair can be requested and approved again without
    // duplicating the delegation.
    RequestGroupApproval::new(project.id.clone(), group.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    ApproveGroup::new(project.id.clone(), group.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    let attached = ListProjectGroups::new(project.id.clone())
        .execute(&ctx)
        .await
        .unwrap();
    assert_eq!(attached.len(), 1);
}
