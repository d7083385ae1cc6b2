//! Tests for the minimax decision engine.

use tictactoe_match::{Board, Mark, TIE, WIN, best_move};

/// Walks every opponent reply while the engine answers with its best move.
fn assert_never_loses(board: Board, to_move: Mark, engine: Mark) {
    if board.is_round_over() {
        assert_ne!(
            board.line_winner(),
            Some(engine.opponent()),
            "engine lost:\n{board}"
        );
        return;
    }

    if to_move == engine {
        let best = best_move(&board, engine, engine.opponent());
        assert!(best.score >= TIE, "engine expects to lose:\n{board}");
        let mut next = board;
        next.place(best.index, engine).expect("engine picked an empty cell");
        assert_never_loses(next, engine.opponent(), engine);
    } else {
        for index in board.available_indices() {
            let mut next = board;
            next.place(index, to_move).unwrap();
            assert_never_loses(next, engine, engine);
        }
    }
}

#[test]
fn test_engine_never_loses_moving_first() {
    assert_never_loses(Board::new(), Mark::X, Mark::X);
}

#[test]
fn test_engine_never_loses_moving_second() {
    assert_never_loses(Board::new(), Mark::X, Mark::O);
}

#[test]
fn test_optimal_play_on_both_sides_ties() {
    let mut board = Board::new();
    let mut to_move = Mark::X;
    while !board.is_round_over() {
        let best = best_move(&board, to_move, to_move.opponent());
        assert_eq!(best.score, TIE);
        board.place(best.index, to_move).unwrap();
        to_move = to_move.opponent();
    }
    assert!(board.is_full());
    assert_eq!(board.line_winner(), None);
}

#[test]
fn test_opening_move_is_corner_or_center() {
    let board = Board::new();
    let best = best_move(&board, Mark::X, Mark::O);
    assert!([0, 2, 4, 6, 8].contains(&best.index));
    assert_eq!(best.score, TIE);
    assert_eq!(board, Board::new());
}

#[test]
fn test_never_picks_occupied_cell() {
    let mut board = Board::new();
    for (index, mark) in [(4, Mark::X), (0, Mark::O), (8, Mark::X)] {
        board.place(index, mark).unwrap();
    }
    let before = board;
    let best = best_move(&board, Mark::O, Mark::X);
    assert!(board.available_indices().contains(&best.index));
    assert_eq!(board, before);
}

#[test]
fn test_blocks_immediate_threat() {
    // _ _ _ / X X _ / O _ _ : O must take 5.
    let mut board = Board::new();
    for (index, mark) in [(3, Mark::X), (6, Mark::O), (4, Mark::X)] {
        board.place(index, mark).unwrap();
    }
    let best = best_move(&board, Mark::O, Mark::X);
    assert_eq!(best.index, 5);
}

#[test]
fn test_wins_when_available() {
    // O O _ / X X _ / X _ _ : O completes the top row.
    let mut board = Board::new();
    for (index, mark) in [(3, Mark::X), (0, Mark::O), (4, Mark::X), (1, Mark::O), (6, Mark::X)] {
        board.place(index, mark).unwrap();
    }
    let best = best_move(&board, Mark::O, Mark::X);
    assert_eq!(best.index, 2);
    assert_eq!(best.score, WIN);
}
