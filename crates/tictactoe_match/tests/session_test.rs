//! Tests for the async match session and its delayed engine moves.

use std::time::Duration;
use tictactoe_match::{
    Cell, Control, Mark, MatchController, MatchEvent, MatchSession, NullObserver, Phase,
    RoundOutcome, Seat,
};
use tokio::sync::mpsc;

const DELAY: Duration = Duration::from_millis(2000);

#[tokio::test(start_paused = true)]
async fn test_engine_move_lands_after_delay() {
    let mut session = MatchSession::new(MatchController::new(NullObserver), DELAY);
    session
        .configure_mode(Control::Human, Control::Ai)
        .await
        .unwrap();
    session.request_placement(4).await.unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    let (filled, locked) = session
        .inspect(|c| (c.board().filled_cells(), c.is_move_locked()))
        .await;
    assert_eq!(filled, 1);
    assert!(locked);

    // A click while the engine is thinking is dropped.
    let err = session.request_placement(0).await.unwrap_err();
    assert!(err.is_ignorable());

    session.wait_idle().await;
    let (filled, locked, side) = session
        .inspect(|c| (c.board().filled_cells(), c.is_move_locked(), c.side_to_move()))
        .await;
    assert_eq!(filled, 2);
    assert!(!locked);
    assert_eq!(side, Some(Seat::A));
}

#[tokio::test(start_paused = true)]
async fn test_restart_drops_pending_engine_move() {
    let mut session = MatchSession::new(MatchController::new(NullObserver), DELAY);
    session
        .configure_mode(Control::Ai, Control::Human)
        .await
        .unwrap();
    assert!(session.inspect(|c| c.is_move_locked()).await);

    session.request_restart().await;
    session.wait_idle().await;

    let (filled, epoch, side) = session
        .inspect(|c| (c.board().filled_cells(), c.epoch(), c.side_to_move()))
        .await;
    assert_eq!(filled, 1);
    assert_eq!(epoch, 1);
    assert_eq!(side, Some(Seat::B));
}

#[tokio::test(start_paused = true)]
async fn test_events_reach_channel_in_order() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = MatchSession::new(MatchController::new(tx), DELAY);
    session
        .configure_mode(Control::Human, Control::Ai)
        .await
        .unwrap();
    session.request_placement(4).await.unwrap();
    session.wait_idle().await;

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    let thinking = events
        .iter()
        .position(|e| matches!(e, MatchEvent::AiThinking { seat: Seat::B }))
        .expect("engine announced its move");
    let reply = events
        .iter()
        .position(|e| matches!(e, MatchEvent::CellChanged { mark: Mark::O, .. }))
        .expect("engine placed its mark");
    assert!(thinking < reply);
    assert_eq!(
        events.last(),
        Some(&MatchEvent::TurnChanged { seat: Seat::A })
    );
}

#[tokio::test(start_paused = true)]
async fn test_naive_human_never_beats_engine() {
    let mut session = MatchSession::new(MatchController::new(NullObserver), DELAY);
    session
        .configure_mode(Control::Human, Control::Ai)
        .await
        .unwrap();

    loop {
        let (phase, board) = session.inspect(|c| (c.phase().clone(), *c.board())).await;
        match phase {
            Phase::AwaitingMove(Seat::A) => {
                let index = board.available_indices()[0];
                session.request_placement(index).await.unwrap();
                session.wait_idle().await;
            }
            Phase::RoundOver(outcome) => {
                assert_eq!(outcome, RoundOutcome::Won(Mark::O));
                break;
            }
            other => panic!("unexpected phase {other:?}"),
        }
    }

    let (scores, board) = session.inspect(|c| (c.scores(), *c.board())).await;
    assert_eq!(scores, (0, 1));
    assert!(board.cells().contains(&Cell::Occupied(Mark::O)));
}

#[tokio::test(start_paused = true)]
async fn test_advance_lets_engine_open_next_round() {
    let mut session = MatchSession::new(MatchController::new(NullObserver), DELAY);
    session
        .configure_mode(Control::Human, Control::Ai)
        .await
        .unwrap();

    while session
        .inspect(|c| matches!(c.phase(), Phase::AwaitingMove(_)))
        .await
    {
        let board = session.inspect(|c| *c.board()).await;
        let index = board.available_indices()[0];
        session.request_placement(index).await.unwrap();
        session.wait_idle().await;
    }

    session.request_advance_round().await;
    assert!(session.inspect(|c| c.is_move_locked()).await);
    session.wait_idle().await;

    let (starter, filled, side, round) = session
        .inspect(|c| (c.starter(), c.board().filled_cells(), c.side_to_move(), c.round_number()))
        .await;
    assert_eq!(starter, Seat::B);
    assert_eq!(filled, 1);
    assert_eq!(side, Some(Seat::A));
    assert_eq!(round, 2);
}

#[tokio::test(start_paused = true)]
async fn test_move_lock_released_after_every_engine_reply() {
    let mut session = MatchSession::new(MatchController::new(NullObserver), DELAY);
    session
        .configure_mode(Control::Human, Control::Ai)
        .await
        .unwrap();

    while let Some(Seat::A) = session.inspect(|c| c.side_to_move()).await {
        let board = session.inspect(|c| *c.board()).await;
        session
            .request_placement(board.available_indices()[0])
            .await
            .unwrap();
        session.wait_idle().await;
        assert!(!session.inspect(|c| c.is_move_locked()).await);
    }

    session.request_restart().await;
    session.request_placement(8).await.unwrap();
    session.wait_idle().await;
    let (locked, filled) = session
        .inspect(|c| (c.is_move_locked(), c.board().filled_cells()))
        .await;
    assert!(!locked);
    assert_eq!(filled, 2);
}
