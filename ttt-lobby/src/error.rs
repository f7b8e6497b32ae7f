//! Lobby error type

use ttt_core::GameError;

use crate::ChatId;

/// Error type for lobby operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LobbyError {
    #[error("Chat {chat_id} already has a game")]
    CurrentGame { chat_id: ChatId },
    #[error("Chat {chat_id} is already waiting for an opponent")]
    AlreadyWaiting { chat_id: ChatId },
    #[error("Not enough players to start a game: {waiting} waiting")]
    NotEnoughPlayers { waiting: usize },
    #[error("Chat {chat_id} has no game")]
    UnknownChat { chat_id: ChatId },
    #[error(transparent)]
    Game(#[from] GameError),
}
