//! Uniformly random legal moves

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::board::Board;
use crate::mark::Move;

/// Get a random move among the empty cells, `None` on a full board
pub fn random_available_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Move> {
    board.empty_cells().choose(rng)
}
