//! Tic-Tac-Toe engine core
//!
//! This crate provides the game model used by the lobby and the arena:
//! - `Board`: the 3x3 grid with win/draw detection and a text codec
//! - `GameConductor`: turn authority handing out one `PlayerHandle` per mark
//! - `find_optimal_move`: exhaustive negamax search for an unbeatable move

pub mod board;
pub mod conductor;
pub mod error;
pub mod mark;
pub mod random;
pub mod search;

// Re-export main types for convenience
pub use board::Board;
pub use conductor::{GameConductor, Outcome, Phase, PlayerHandle};
pub use error::{DecodeError, GameError};
pub use mark::{Mark, Move};
pub use random::random_available_move;
pub use search::{evaluate, find_optimal_move, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};
