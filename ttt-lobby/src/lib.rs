//! Lobby for chat-driven Tic-Tac-Toe games
//!
//! This crate keeps the in-memory bookkeeping a chat front end needs:
//! - `PlayersQueue`: FIFO of players waiting for an opponent
//! - `Multiplayer`: pairs queued players and tracks their shared games
//! - `Singleplayer`: games of one player against a bot
//!
//! Chats are identified by opaque integer ids. Nothing here performs I/O;
//! hosts serving many chats at once keep each lobby behind a `Mutex`.

pub mod error;
pub mod multiplayer;
pub mod queue;
pub mod singleplayer;

/// Opaque identifier of a chat
pub type ChatId = i64;

/// Opaque identifier of a message inside a chat
pub type MessageId = i64;

// Re-export main types for convenience
pub use error::LobbyError;
pub use multiplayer::{ChatPlayerInfo, GameId, GameView, Multiplayer};
pub use queue::{PlayersQueue, WaitingPlayer};
pub use singleplayer::{BotLevel, Singleplayer, TurnReport};
