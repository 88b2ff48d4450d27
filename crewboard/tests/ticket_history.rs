//! The append-only ticket history ledger.

use crewboard::board::AddBoard;
use crewboard::group::AddGroup;
use crewboard::project::AddProject;
use crewboard::stage::AddStage;
use crewboard::ticket::{AddTicket, CompleteTicket, GetTicket, MoveTicket, UpdateTicket};
use crewboard::types::{Board, BoardStage, Role, TrackedField, UserId};
use crewboard::user::AddUser;
use crewboard::{CrewboardContext, Execute, Session};

struct Fixture {
    ctx: CrewboardContext,
    board: Board,
    todo: BoardStage,
    doing: BoardStage,
}

async fn fixture() -> Fixture {
    let boot = CrewboardContext::in_memory(Session::new(UserId::new()));
    let admin = AddUser::new("Ada", "Admin")
        .with_roles(vec![Role::Admin])
        .execute(&boot)
        .await
        .unwrap();
    let ctx = boot.with_session(Session::new(admin.id));

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
    Fixture {
        ctx,
        board,
        todo,
        doing,
    }
}

#[tokio::test]
async fn test_creation_writes_no_history() {
    let f = fixture().await;

    let ticket = AddTicket::new(f.board.id.clone(), "Fix login")
        .execute(&f.ctx)
        .await
        .unwrap();
    assert_eq!(ticket.stage_id, f.todo.stage_id);

    let fetched = GetTicket::new(ticket.id.clone())
        .execute(&f.ctx)
        .await
        .unwrap();
    assert!(fetched.history.is_empty());
}

#[tokio::test]
async fn test_one_update_shares_timestamp_and_note() {
    let f = fixture().await;
    let ticket = AddTicket::new(f.board.id.clone(), "Fix login")
        .execute(&f.ctx)
        .await
        .unwrap();

    UpdateTicket::new(ticket.id.clone())
        .with_title("Fix login flow")
        .with_description("500 on POST /login")
        .with_note("triage call")
        .execute(&f.ctx)
        .await
        .unwrap();

    let fetched = GetTicket::new(ticket.id.clone())
        .execute(&f.ctx)
        .await
        .unwrap();
    assert_eq!(fetched.history.len(), 2);

    let mut properties: Vec<_> = fetched.history.iter().map(|e| e.property).collect();
    properties.sort_by_key(|p| p.as_str());
    assert_eq!(
        properties,
        vec![TrackedField::Description, TrackedField::Title]
    );
    assert!(fetched.history.iter().all(|e| e.note == "triage call"));
    assert_eq!(fetched.history[0].changed_at, fetched.history[1].changed_at);
}

#[tokio::test]
async fn test_move_then_complete_builds_a_trail() {
    let f = fixture().await;
    let ticket = AddTicket::new(f.board.id.clone(), "Fix login")
        .execute(&f.ctx)
        .await
        .unwrap();

    MoveTicket::new(ticket.id.clone(), f.doing.stage_id.clone())
        .with_note("picked up")
        .execute(&f.ctx)
        .await
        .unwrap();
    let done = CompleteTicket::new(ticket.id.clone())
        .execute(&f.ctx)
        .await
        .unwrap();
    assert!(done.completed);

    let fetched = GetTicket::new(ticket.id.clone())
        .execute(&f.ctx)
        .await
        .unwrap();
    let trail: Vec<_> = fetched.history.iter().map(|e| e.property).collect();
    assert_eq!(trail, vec![TrackedField::Stage, TrackedField::Completed]);

    let moved = &fetched.history[0];
    assert_eq!(moved.old_value.as_deref(), Some(f.todo.stage_id.as_str()));
    assert_eq!(moved.new_value.as_deref(), Some(f.doing.stage_id.as_str()));
    assert_eq!(moved.note, "picked up");
    assert!(fetched.history[0].changed_at <= fetched.history[1].changed_at);
}
