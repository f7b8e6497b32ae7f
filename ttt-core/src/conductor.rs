//! Turn authority for one game
//!
//! A `GameConductor` owns the board and hands out exactly one `PlayerHandle`
//! per mark. Moves only reach the board through the conductor, which enforces
//! alternation (`Cross` first) and stops accepting moves once the game is over.
//!
//! Handles borrow the conductor, so both sides of a local game can hold one at
//! the same time. State lives in a `Cell`, which keeps the conductor `Send`;
//! hosts that share a game between threads wrap it in a `Mutex`.

use std::cell::Cell;

use tracing::debug;

use crate::board::Board;
use crate::error::GameError;
use crate::mark::{Mark, Move};

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    GameOver,
}

/// Final result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Mark),
    Draw,
}

#[derive(Debug, Clone, Copy)]
struct TurnState {
    board: Board,
    /// Marks not yet bound to a handle, indexed like `Mark::PLAYERS`
    available: [bool; 2],
    current: Mark,
    phase: Phase,
}

impl TurnState {
    fn is_available(&self, mark: Mark) -> bool {
        seat(mark).is_some_and(|i| self.available[i])
    }

    fn first_available(&self) -> Option<Mark> {
        Mark::PLAYERS
            .into_iter()
            .find(|&mark| self.is_available(mark))
    }
}

fn seat(mark: Mark) -> Option<usize> {
    Mark::PLAYERS.iter().position(|&player| player == mark)
}

/// Game engine enforcing turn order for a single game
#[derive(Debug)]
pub struct GameConductor {
    state: Cell<TurnState>,
}

impl GameConductor {
    /// Start a new game with `Cross` to move
    pub fn new() -> Self {
        Self {
            state: Cell::new(TurnState {
                board: Board::new(),
                available: [true; 2],
                current: Mark::Cross,
                phase: Phase::InProgress,
            }),
        }
    }

    /// Get a handle for playing in this game
    ///
    /// * `mark` - preferred mark; honoured whenever it is still free
    /// * `take_remaining` - accept the other mark if the preferred one is taken
    ///
    /// With no preference the caller gets `Cross` while both marks are free,
    /// otherwise whichever mark is left.
    pub fn issue_handle(
        &self,
        mark: Option<Mark>,
        take_remaining: bool,
    ) -> Result<PlayerHandle<'_>, GameError> {
        let mut state = self.state.get();
        if mark.is_some_and(|wanted| !wanted.is_player()) {
            return Err(GameError::InvalidMark);
        }

        let remaining = state.first_available().ok_or(GameError::MarksExhausted)?;
        let granted = match mark {
            Some(wanted) if state.is_available(wanted) => wanted,
            Some(_) if take_remaining => remaining,
            Some(wanted) => return Err(GameError::MarkAlreadyTaken { mark: wanted }),
            None => remaining,
        };

        if let Some(i) = seat(granted) {
            state.available[i] = false;
        }
        self.state.set(state);
        debug!("Issued handle for {}", granted);

        Ok(PlayerHandle {
            conductor: self,
            mark: granted,
        })
    }

    /// Apply a move for `mark`
    ///
    /// Rejected moves leave the game untouched.
    pub fn apply_move(&self, mv: Move, mark: Mark) -> Result<(), GameError> {
        let mut state = self.state.get();
        if state.phase == Phase::GameOver {
            return Err(GameError::GameAlreadyOver);
        }
        if state.current != mark {
            return Err(GameError::NotYourTurn { mark });
        }

        state.board.make_move(mv, mark)?;

        if state.board.is_game_over()? {
            state.phase = Phase::GameOver;
            debug!("{} played {}, game over:\n{}", mark, mv, state.board);
        } else if let Some(next) = mark.opponent() {
            state.current = next;
            debug!("{} played {}, {} to move", mark, mv, next);
        }

        self.state.set(state);
        Ok(())
    }

    /// Result of a finished game
    pub fn result(&self) -> Result<Outcome, GameError> {
        let state = self.state.get();
        if state.phase != Phase::GameOver {
            return Err(GameError::GameNotOver);
        }
        Ok(match state.board.get_winner()? {
            Some(mark) => Outcome::Winner(mark),
            None => Outcome::Draw,
        })
    }

    /// Snapshot of the board
    pub fn board(&self) -> Board {
        self.state.get().board
    }

    /// Mark whose turn it is; stays on the last mover once the game is over
    pub fn current_mark(&self) -> Mark {
        self.state.get().current
    }

    pub fn phase(&self) -> Phase {
        self.state.get().phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase() == Phase::GameOver
    }

    /// Whether `mark` may move now; nobody may once the game is over
    pub fn is_turn_of(&self, mark: Mark) -> bool {
        let state = self.state.get();
        state.phase == Phase::InProgress && state.current == mark
    }
}

impl Default for GameConductor {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability to play one mark in one game
#[derive(Debug, Clone, Copy)]
pub struct PlayerHandle<'a> {
    conductor: &'a GameConductor,
    mark: Mark,
}

impl PlayerHandle<'_> {
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Is it this player's turn
    pub fn is_my_turn(&self) -> bool {
        self.conductor.is_turn_of(self.mark)
    }

    /// Make a move for this player's mark
    pub fn submit(&self, mv: Move) -> Result<(), GameError> {
        self.conductor.apply_move(mv, self.mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_game() {
        let game = GameConductor::new();
        let cross = game.issue_handle(Some(Mark::Cross), false).unwrap();
        let nought = game.issue_handle(None, false).unwrap();
        assert_eq!(nought.mark(), Mark::Nought);

        cross.submit(Move::new(0, 1)).unwrap();
        assert!(!cross.is_my_turn());
        assert!(nought.is_my_turn());

        assert_eq!(
            cross.submit(Move::new(0, 1)),
            Err(GameError::NotYourTurn { mark: Mark::Cross })
        );
        assert_eq!(game.board().count_empty(), 8);
        assert_eq!(game.current_mark(), Mark::Nought);

        nought.submit(Move::new(0, 0)).unwrap();
        assert_eq!(game.board().count_empty(), 7);
        assert_eq!(game.current_mark(), Mark::Cross);

        assert_eq!(
            cross.submit(Move::new(0, 0)),
            Err(GameError::CellOccupied { occupant: Mark::Nought })
        );
        assert_eq!(game.board().count_empty(), 7);
        assert_eq!(game.current_mark(), Mark::Cross);

        cross.submit(Move::new(1, 1)).unwrap();
        nought.submit(Move::new(0, 2)).unwrap();
        assert_eq!(game.result(), Err(GameError::GameNotOver));
        cross.submit(Move::new(2, 1)).unwrap(); // column win

        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.board().count_empty(), 4);
        assert_eq!(game.result(), Ok(Outcome::Winner(Mark::Cross)));
        assert_eq!(
            nought.submit(Move::new(2, 2)),
            Err(GameError::GameAlreadyOver)
        );
        assert!(!nought.is_my_turn());
        // current mark stays on the winner, who still may not move
        assert_eq!(game.current_mark(), Mark::Cross);
        assert!(!cross.is_my_turn());
        assert!(!game.is_turn_of(Mark::Cross));
        assert_eq!(game.board().to_string(), "OXO\n_X_\n_X_");
    }

    #[test]
    fn test_draw_result() {
        let game = GameConductor::new();
        let cross = game.issue_handle(None, false).unwrap();
        let nought = game.issue_handle(None, false).unwrap();

        // X O X / X O O / O X X
        let moves = [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)];
        for (i, &(r, c)) in moves.iter().enumerate() {
            let handle = if i % 2 == 0 { &cross } else { &nought };
            handle.submit(Move::new(r, c)).unwrap();
        }

        assert!(game.is_game_over());
        assert_eq!(game.result(), Ok(Outcome::Draw));
    }

    #[test]
    fn test_nought_cannot_open() {
        let game = GameConductor::new();
        let _cross = game.issue_handle(Some(Mark::Cross), false).unwrap();
        let nought = game.issue_handle(Some(Mark::Nought), false).unwrap();

        assert_eq!(
            nought.submit(Move::new(1, 1)),
            Err(GameError::NotYourTurn { mark: Mark::Nought })
        );
        assert_eq!(game.board(), Board::new());
        assert_eq!(game.current_mark(), Mark::Cross);
    }

    #[test]
    fn test_take_remaining() {
        let game = GameConductor::new();
        let first = game.issue_handle(Some(Mark::Cross), true).unwrap();
        let second = game.issue_handle(Some(Mark::Cross), true).unwrap();
        assert_eq!(first.mark(), Mark::Cross);
        assert_eq!(second.mark(), Mark::Nought);
        assert!(first.is_my_turn());
        assert!(!second.is_my_turn());

        first.submit(Move::new(0, 0)).unwrap();
        assert!(!first.is_my_turn());
        assert!(second.is_my_turn());
    }

    #[test]
    fn test_explicit_nought_first() {
        let game = GameConductor::new();
        let nought = game.issue_handle(Some(Mark::Nought), false).unwrap();
        let other = game.issue_handle(None, false).unwrap();
        assert_eq!(nought.mark(), Mark::Nought);
        assert_eq!(other.mark(), Mark::Cross);
    }

    #[test]
    fn test_is_turn_of() {
        let game = GameConductor::new();
        assert!(game.is_turn_of(Mark::Cross));
        assert!(!game.is_turn_of(Mark::Nought));
        assert!(!game.is_turn_of(Mark::Empty));

        game.apply_move(Move::new(1, 1), Mark::Cross).unwrap();
        assert!(game.is_turn_of(Mark::Nought));
        assert!(!game.is_turn_of(Mark::Cross));
    }

    #[test]
    fn test_issue_errors() {
        let game = GameConductor::new();
        assert_eq!(
            game.issue_handle(Some(Mark::Empty), true).unwrap_err(),
            GameError::InvalidMark
        );

        game.issue_handle(Some(Mark::Cross), false).unwrap();
        assert_eq!(
            game.issue_handle(Some(Mark::Cross), false).unwrap_err(),
            GameError::MarkAlreadyTaken { mark: Mark::Cross }
        );

        game.issue_handle(None, false).unwrap();
        assert_eq!(
            game.issue_handle(None, true).unwrap_err(),
            GameError::MarksExhausted
        );
        assert_eq!(
            game.issue_handle(Some(Mark::Nought), true).unwrap_err(),
            GameError::MarksExhausted
        );
    }

    #[test]
    fn test_conductor_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<GameConductor>();
    }
}
