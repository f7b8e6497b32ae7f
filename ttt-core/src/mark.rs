//! Cell marks and board coordinates

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Side length of the board
pub const SIZE: usize = 3;

/// Number of cells on the board
pub const CELLS: usize = SIZE * SIZE;

/// Content of a cell, doubling as the identity of a player
///
/// `Cross` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    Cross,
    Nought,
}

impl Mark {
    /// Both player marks in turn order
    pub const PLAYERS: [Mark; 2] = [Mark::Cross, Mark::Nought];

    /// Get the other player's mark, `None` for an empty cell
    pub fn opponent(self) -> Option<Mark> {
        match self {
            Mark::Cross => Some(Mark::Nought),
            Mark::Nought => Some(Mark::Cross),
            Mark::Empty => None,
        }
    }

    /// Whether this mark belongs to a player rather than an empty cell
    pub fn is_player(self) -> bool {
        self != Mark::Empty
    }

    /// Glyph used when rendering a board for people
    pub fn glyph(self) -> char {
        match self {
            Mark::Empty => '_',
            Mark::Cross => 'X',
            Mark::Nought => 'O',
        }
    }

    /// Glyph used in the 9-character wire form of a board
    pub fn wire_glyph(self) -> char {
        match self {
            Mark::Empty => '.',
            other => other.glyph(),
        }
    }

    /// Parse either glyph form; both `.` and `_` read as empty
    pub fn from_glyph(glyph: char) -> Option<Mark> {
        match glyph {
            '.' | '_' => Some(Mark::Empty),
            'X' => Some(Mark::Cross),
            'O' => Some(Mark::Nought),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Zero-based `(row, col)` coordinate of a cell
///
/// Serialized as a `(row, col)` pair; deserializing goes through
/// [`Move::try_new`], so out-of-range input is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    /// All cells in row-major order
    pub const ALL: [Move; CELLS] = [
        Move::new(0, 0), Move::new(0, 1), Move::new(0, 2),
        Move::new(1, 0), Move::new(1, 1), Move::new(1, 2),
        Move::new(2, 0), Move::new(2, 1), Move::new(2, 2),
    ];

    /// Create a move from trusted coordinates
    ///
    /// Coordinates must lie in `[0, 2]`; use [`Move::try_new`] for input that
    /// comes from outside the engine.
    pub const fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < SIZE && col < SIZE);
        Self { row, col }
    }

    /// Create a move, rejecting coordinates outside the board
    pub fn try_new(row: usize, col: usize) -> Result<Self, GameError> {
        if row >= SIZE || col >= SIZE {
            return Err(GameError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self::new(index / SIZE, index % SIZE)
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Row-major cell index in `[0, 8]`
    pub fn index(&self) -> usize {
        self.row * SIZE + self.col
    }
}

impl TryFrom<(usize, usize)> for Move {
    type Error = GameError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Move::try_new(row, col)
    }
}

impl From<Move> for (usize, usize) {
    fn from(mv: Move) -> Self {
        (mv.row, mv.col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
