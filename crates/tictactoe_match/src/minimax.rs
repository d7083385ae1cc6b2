//! Exhaustive minimax search for the optimal move.
//!
//! The tree below a 3x3 position is small enough to search completely: at
//! most nine plies, with branches ending early on a completed line. Every
//! leaf is scored from the point of view of the engine's seat.

use crate::board::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Leaf value when the engine's mark completes a line.
pub const WIN: i32 = 1;
/// Leaf value for a full board without a line.
pub const TIE: i32 = 0;
/// Leaf value when the opponent's mark completes a line.
pub const LOSS: i32 = -1;

/// Initial running best; lies outside every reachable score.
const INFINITY: i32 = 400;

/// The move chosen at the root of the search and its backed-up value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BestMove {
    /// Board index to play.
    pub index: usize,
    /// Game-theoretic value of the move: `WIN`, `TIE` or `LOSS`.
    pub score: i32,
}

/// Computes the optimal move for `ai` with `opponent` replying.
///
/// Ties between equally scored moves go to the lowest index.
///
/// # Panics
///
/// Panics if the round is already over. The controller never asks for a
/// move on a terminal board.
#[instrument(skip(board), fields(free = board.free_cells()))]
pub fn best_move(board: &Board, ai: Mark, opponent: Mark) -> BestMove {
    assert!(
        !board.is_round_over(),
        "minimax invoked on a finished board:\n{board}"
    );
    assert_ne!(ai, opponent, "engine and opponent must hold different marks");

    let mut scratch = *board;
    let mut best = BestMove {
        index: usize::MAX,
        score: -INFINITY,
    };

    for index in board.available_indices() {
        let score = probe(&mut scratch, index, ai, ai, opponent);
        if score > best.score {
            best = BestMove { index, score };
        }
    }

    debug!(index = best.index, score = best.score, "Minimax picked move");
    best
}

/// Plays `mover` at `index`, scores the resulting position and takes the
/// mark back off again.
fn probe(board: &mut Board, index: usize, mover: Mark, ai: Mark, opponent: Mark) -> i32 {
    let placed = board.place(index, mover);
    debug_assert!(placed.is_ok(), "probed an occupied cell");
    let next = if mover == ai { opponent } else { ai };
    let score = search(board, next, ai, opponent);
    if placed.is_ok() {
        board.vacate(index);
    }
    score
}

/// Value of `board` with `to_move` about to play.
pub(crate) fn search(board: &mut Board, to_move: Mark, ai: Mark, opponent: Mark) -> i32 {
    if let Some(mark) = board.line_winner() {
        return if mark == ai { WIN } else { LOSS };
    }
    if board.is_full() {
        return TIE;
    }

    let maximizing = to_move == ai;
    let mut best = if maximizing { -INFINITY } else { INFINITY };

    for index in board.available_indices() {
        let score = probe(board, index, to_move, ai, opponent);
        if (maximizing && score > best) || (!maximizing && score < best) {
            best = score;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(marks: &[(usize, Mark)]) -> Board {
        let mut board = Board::new();
        for &(index, mark) in marks {
            board.place(index, mark).unwrap();
        }
        board
    }

    #[test]
    fn test_empty_board_opens_in_corner_with_forced_tie() {
        let board = Board::new();
        let best = best_move(&board, Mark::X, Mark::O);
        assert_eq!(best, BestMove { index: 0, score: TIE });
        assert!([0, 2, 4, 6, 8].contains(&best.index));
    }

    #[test]
    fn test_takes_immediate_win() {
        // X X _ / O O _ / _ _ _ with O to move.
        let board = board_from(&[(0, Mark::X), (1, Mark::X), (3, Mark::O), (4, Mark::O)]);
        let best = best_move(&board, Mark::O, Mark::X);
        assert_eq!(best.score, WIN);
        // Index 5 completes the middle row at once. Index 2 blocks X and forks
        // on 5 and 6, so it is also a forced win, and the lowest index wins ties.
        assert_eq!(best.index, 2);

        // Without the fork the only winning move is completing the row.
        let board = board_from(&[
            (0, Mark::X),
            (1, Mark::X),
            (3, Mark::O),
            (4, Mark::O),
            (2, Mark::O),
            (6, Mark::X),
        ]);
        let best = best_move(&board, Mark::O, Mark::X);
        assert_eq!(best, BestMove { index: 5, score: WIN });
    }

    #[test]
    fn test_blocks_opponent_line() {
        // X X _ / _ O _ / _ _ _ with O to move: 2 is the only move that holds.
        let board = board_from(&[(0, Mark::X), (1, Mark::X), (4, Mark::O)]);
        let best = best_move(&board, Mark::O, Mark::X);
        assert_eq!(best.index, 2);
        assert_eq!(best.score, TIE);
    }

    #[test]
    fn test_reports_lost_position() {
        // X forks on 2 and 3; O cannot cover both.
        let board = board_from(&[(0, Mark::X), (1, Mark::O), (4, Mark::X), (8, Mark::O), (6, Mark::X)]);
        let best = best_move(&board, Mark::O, Mark::X);
        assert_eq!(best.score, LOSS);
    }

    #[test]
    fn test_search_restores_scratch_board() {
        let mut board = board_from(&[(4, Mark::X), (0, Mark::O)]);
        let before = board;
        let value = search(&mut board, Mark::X, Mark::X, Mark::O);
        assert_eq!(board, before);
        assert!((LOSS..=WIN).contains(&value));
    }

    #[test]
    fn test_best_move_leaves_input_untouched() {
        let board = board_from(&[(4, Mark::X)]);
        let before = board;
        let best = best_move(&board, Mark::O, Mark::X);
        assert_eq!(board, before);
        assert!(board.available_indices().contains(&best.index));
    }

    #[test]
    #[should_panic(expected = "finished board")]
    fn test_panics_on_finished_board() {
        let board = board_from(&[(0, Mark::X), (1, Mark::X), (2, Mark::X)]);
        best_move(&board, Mark::O, Mark::X);
    }
}
