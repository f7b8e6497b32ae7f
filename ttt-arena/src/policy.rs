use anyhow::{anyhow, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use ttt_core::{find_optimal_move, random_available_move, Board, Mark, Move};

use crate::config::Opponent;

/// Trait for move selection policies
pub trait Policy: Send {
    fn name(&self) -> &'static str;

    /// Select a move for `mark` on the given board
    fn select_move(&mut self, board: &Board, mark: Mark) -> Result<Move>;
}

/// Random policy that picks among empty cells uniformly
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_move(&mut self, board: &Board, mark: Mark) -> Result<Move> {
        random_available_move(board, &mut self.rng)
            .ok_or_else(|| anyhow!("No empty cell left for {}", mark))
    }
}

/// Policy backed by the full game tree search
pub struct MinimaxPolicy;

impl Policy for MinimaxPolicy {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn select_move(&mut self, board: &Board, mark: Mark) -> Result<Move> {
        find_optimal_move(board, mark)
            .ok_or_else(|| anyhow!("Search found no move for {} on\n{}", mark, board))
    }
}

/// Build the opponent policy for one game
pub fn opponent(kind: Opponent, seed: Option<u64>) -> Box<dyn Policy> {
    match (kind, seed) {
        (Opponent::Random, Some(seed)) => Box::new(RandomPolicy::with_seed(seed)),
        (Opponent::Random, None) => Box::new(RandomPolicy::new()),
        (Opponent::Minimax, _) => Box::new(MinimaxPolicy),
    }
}
