//! Optimal move search
//!
//! Negamax over the full game tree: the score of a position for the side to
//! move is the negation of the opponent's best score after each reply. Scores
//! are `WIN_SCORE`, `LOSS_SCORE` or `DRAW_SCORE` with no depth weighting.
//!
//! Every node carries a single cutoff bound, the best score the caller can
//! already guarantee. Once the running best at a node reaches that bound the
//! remaining siblings are skipped, since they cannot change the caller's
//! choice. The tree is small enough that the missing second bound of full
//! alpha-beta does not matter.
//!
//! The search works on a private copy of the board and restores it after each
//! trial move.

use crate::board::Board;
use crate::mark::{Mark, Move};

/// Score of a position won by the side being scored
pub const WIN_SCORE: i32 = 10;

/// Score of a position lost by the side being scored
pub const LOSS_SCORE: i32 = -10;

/// Score of a drawn position
pub const DRAW_SCORE: i32 = 0;

/// Below any reachable score, and its negation above any
const UNSCORED: i32 = -200;

/// Get the optimal move for `mark`
///
/// Returns the first cell in row-major order that reaches the best score
/// against perfect play. Returns `None` if `mark` is `Empty` or the board has
/// no empty cell. The caller's board is never modified.
pub fn find_optimal_move(board: &Board, mark: Mark) -> Option<Move> {
    root_search(board, mark).map(|(mv, _)| mv)
}

/// Score of the position for `mark` to move under perfect play
///
/// `None` under the same conditions as [`find_optimal_move`].
pub fn evaluate(board: &Board, mark: Mark) -> Option<i32> {
    root_search(board, mark).map(|(_, score)| score)
}

fn root_search(board: &Board, mark: Mark) -> Option<(Move, i32)> {
    let opponent = mark.opponent()?;
    let mut scratch = *board;
    let mut best: Option<(Move, i32)> = None;

    for mv in Move::ALL {
        if !scratch.is_move_legal(mv) {
            continue;
        }
        let bound = best.map_or(-UNSCORED, |(_, score)| -score);

        scratch.set(mv, mark);
        let score = -negamax(&mut scratch, opponent, mark, bound);
        scratch.set(mv, Mark::Empty);

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }

    debug_assert_eq!(scratch, *board);
    best
}

/// Score for `me` to move, cutting off once `bound` is reached
fn negamax(board: &mut Board, me: Mark, opponent: Mark, bound: i32) -> i32 {
    if let Some(score) = terminal_score(board, me, opponent) {
        return score;
    }

    #[cfg(debug_assertions)]
    let before = *board;

    let mut best = UNSCORED;
    for mv in Move::ALL {
        if !board.is_move_legal(mv) {
            continue;
        }
        if best >= bound {
            return best;
        }

        board.set(mv, me);
        let score = -negamax(board, opponent, me, -best);
        board.set(mv, Mark::Empty);

        #[cfg(debug_assertions)]
        debug_assert_eq!(*board, before, "undo left the board changed at {}", mv);

        best = best.max(score);
    }
    best
}

fn terminal_score(board: &Board, me: Mark, opponent: Mark) -> Option<i32> {
    if board.has_line(me) {
        Some(WIN_SCORE)
    } else if board.has_line(opponent) {
        Some(LOSS_SCORE)
    } else if board.count_empty() == 0 {
        Some(DRAW_SCORE)
    } else {
        None
    }
}
