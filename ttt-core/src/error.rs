//! Error types for board, turn and codec operations

use crate::mark::Mark;

/// Error type for game rule and turn violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Move ({row}, {col}) is outside the 3x3 board")]
    OutOfRange { row: usize, col: usize },
    #[error("This cell is not free, it holds {occupant}")]
    CellOccupied { occupant: Mark },
    #[error("Game rules violated: {0}")]
    GameRules(String),
    #[error("Now it is the move of an opponent, {mark} has to wait")]
    NotYourTurn { mark: Mark },
    #[error("Game has ended, no more moves")]
    GameAlreadyOver,
    #[error("Game is not over")]
    GameNotOver,
    #[error("Mark {mark} is already taken for this game instance")]
    MarkAlreadyTaken { mark: Mark },
    #[error("Both marks are already taken for this game instance")]
    MarksExhausted,
    #[error("Empty cell mark cannot play")]
    InvalidMark,
}

/// Error type for decoding the text form of a board
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid board length: expected {expected} cells but got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Invalid glyph {glyph:?} at position {position}")]
    InvalidGlyph { glyph: char, position: usize },
}
