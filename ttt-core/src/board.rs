//! Game board for 3x3 Tic-Tac-Toe
//!
//! The board stores nine marks in row-major order. It is `Copy`, so the search
//! can take a private snapshot and explore it with in-place mutate/undo.

use std::fmt;
use std::str::FromStr;

use crate::error::{DecodeError, GameError};
use crate::mark::{Mark, Move, CELLS, SIZE};

/// Winning lines (rows, columns, diagonals) as row-major cell indices
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // columns
    [0, 4, 8], [2, 4, 6],            // diagonals
];

/// 3x3 grid of marks, all cells empty at the start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Mark; CELLS],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; CELLS],
        }
    }

    /// Build a board from rows of marks
    pub fn from_rows(rows: [[Mark; SIZE]; SIZE]) -> Self {
        let mut board = Self::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, &mark) in row.iter().enumerate() {
                board.set(Move::new(r, c), mark);
            }
        }
        board
    }

    /// Get the content of a cell
    pub fn get(&self, mv: Move) -> Mark {
        self.cells[mv.index()]
    }

    /// Get the content of a cell from unchecked coordinates
    pub fn try_get(&self, row: usize, col: usize) -> Result<Mark, GameError> {
        Ok(self.get(Move::try_new(row, col)?))
    }

    /// Write a mark into a cell with no legality check
    pub fn set(&mut self, mv: Move, mark: Mark) {
        self.cells[mv.index()] = mark;
    }

    /// Count empty cells, in `[0, 9]`
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Mark::Empty).count()
    }

    /// Legal moves (empty cells) in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Mark::Empty)
            .map(|(i, _)| Move::from_index(i))
    }

    /// A move is legal if its cell is empty
    pub fn is_move_legal(&self, mv: Move) -> bool {
        self.get(mv) == Mark::Empty
    }

    /// Put a mark into an empty cell
    ///
    /// Fails with `CellOccupied` and leaves the board untouched if the cell
    /// is already taken.
    pub fn make_move(&mut self, mv: Move, mark: Mark) -> Result<(), GameError> {
        match self.get(mv) {
            Mark::Empty => {
                self.set(mv, mark);
                Ok(())
            }
            occupant => Err(GameError::CellOccupied { occupant }),
        }
    }

    /// Whether `mark` owns at least one complete line
    pub(crate) fn has_line(&self, mark: Mark) -> bool {
        LINES.iter().any(|line| line.iter().all(|&i| self.cells[i] == mark))
    }

    /// Find the owner of a complete line
    ///
    /// Returns `Ok(None)` for a running game or a draw. Two different owners
    /// can only come from broken move application and are reported as
    /// `GameRules`.
    pub fn get_winner(&self) -> Result<Option<Mark>, GameError> {
        let mut winner = None;
        for mark in Mark::PLAYERS {
            if self.has_line(mark) {
                if winner.is_some() {
                    return Err(GameError::GameRules(
                        "two winners on one board".to_string(),
                    ));
                }
                winner = Some(mark);
            }
        }
        Ok(winner)
    }

    /// Game is over if there is a winner or no empty cells
    pub fn is_game_over(&self) -> Result<bool, GameError> {
        Ok(self.count_empty() == 0 || self.get_winner()?.is_some())
    }

    /// Encode as 9 characters in row-major order, `.` for empty cells
    pub fn encode(&self) -> String {
        self.cells.iter().map(|mark| mark.wire_glyph()).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.chunks(SIZE).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for mark in row {
                write!(f, "{}", mark.glyph())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = DecodeError;

    /// Decode the 9-character wire form; `_` is accepted for empty cells too
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let glyphs: Vec<char> = s.chars().collect();
        if glyphs.len() != CELLS {
            return Err(DecodeError::InvalidLength {
                expected: CELLS,
                actual: glyphs.len(),
            });
        }

        let mut board = Board::new();
        for (position, &glyph) in glyphs.iter().enumerate() {
            let mark = Mark::from_glyph(glyph)
                .ok_or(DecodeError::InvalidGlyph { glyph, position })?;
            board.set(Move::from_index(position), mark);
        }
        Ok(board)
    }
}
