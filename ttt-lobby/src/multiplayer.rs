//! Pairing of remote players
//!
//! Players register into a FIFO queue; once two are waiting, `register_pair`
//! starts a game between the two who waited longest. The first of them always
//! plays `Cross` and therefore moves first. Both chats are linked to the same
//! game until it is removed.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info};
use ttt_core::{GameConductor, GameError, Mark, Move};
use uuid::Uuid;

use crate::error::LobbyError;
use crate::queue::{PlayersQueue, WaitingPlayer};
use crate::{ChatId, MessageId};

/// Identifier of a running multiplayer game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(Uuid);

impl GameId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Basic info about a player seated in a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPlayerInfo {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub user_name: String,
    pub mark: Mark,
}

impl ChatPlayerInfo {
    fn seat(player: WaitingPlayer, mark: Mark) -> Self {
        Self {
            chat_id: player.chat_id,
            message_id: player.message_id,
            user_name: player.user_name,
            mark,
        }
    }
}

#[derive(Debug)]
struct SharedGame {
    players: [ChatPlayerInfo; 2],
    conductor: GameConductor,
}

/// A game seen from one of its players
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub id: GameId,
    pub myself: &'a ChatPlayerInfo,
    pub opponent: &'a ChatPlayerInfo,
    pub conductor: &'a GameConductor,
}

impl GameView<'_> {
    pub fn is_my_turn(&self) -> bool {
        self.conductor.is_turn_of(self.myself.mark)
    }

    /// Play a move with this player's mark
    pub fn submit(&self, mv: Move) -> Result<(), GameError> {
        self.conductor.apply_move(mv, self.myself.mark)
    }
}

/// Connects two players, manages the queue and running games
#[derive(Debug, Default)]
pub struct Multiplayer {
    queue: PlayersQueue,
    games: HashMap<GameId, SharedGame>,
    chats: HashMap<ChatId, GameId>,
}

impl Multiplayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a player in the queue
    pub fn register_player(&mut self, player: WaitingPlayer) -> Result<(), LobbyError> {
        let chat_id = player.chat_id;
        if self.chats.contains_key(&chat_id) {
            return Err(LobbyError::CurrentGame { chat_id });
        }
        if self.queue.contains(chat_id) {
            return Err(LobbyError::AlreadyWaiting { chat_id });
        }

        debug!("Chat {} ({}) is waiting for an opponent", chat_id, player.user_name);
        self.queue.enqueue(player);
        Ok(())
    }

    /// Start a game with the two earliest players in the queue
    pub fn register_pair(&mut self) -> Result<GameId, LobbyError> {
        let waiting = self.queue.len();
        if waiting < 2 {
            return Err(LobbyError::NotEnoughPlayers { waiting });
        }
        let (Some(first), Some(second)) = (self.queue.dequeue(), self.queue.dequeue()) else {
            return Err(LobbyError::NotEnoughPlayers { waiting });
        };

        let conductor = GameConductor::new();
        // first joined player always gets Cross; handles borrow the
        // conductor, so the game keeps only the granted marks
        let first_mark = conductor.issue_handle(Some(Mark::Cross), true)?.mark();
        let second_mark = conductor.issue_handle(Some(Mark::Cross), true)?.mark();

        let id = GameId::new();
        self.chats.insert(first.chat_id, id);
        self.chats.insert(second.chat_id, id);
        info!(
            "Started game {} between chat {} ({}) and chat {} ({})",
            id, first.chat_id, first_mark, second.chat_id, second_mark
        );

        self.games.insert(
            id,
            SharedGame {
                players: [
                    ChatPlayerInfo::seat(first, first_mark),
                    ChatPlayerInfo::seat(second, second_mark),
                ],
                conductor,
            },
        );
        Ok(id)
    }

    /// Get the game of a chat from that chat's point of view
    pub fn get_game(&self, chat_id: ChatId) -> Result<GameView<'_>, LobbyError> {
        let id = *self
            .chats
            .get(&chat_id)
            .ok_or(LobbyError::UnknownChat { chat_id })?;
        let game = self
            .games
            .get(&id)
            .ok_or(LobbyError::UnknownChat { chat_id })?;

        let [a, b] = &game.players;
        let (myself, opponent) = if a.chat_id == chat_id { (a, b) } else { (b, a) };
        Ok(GameView {
            id,
            myself,
            opponent,
            conductor: &game.conductor,
        })
    }

    /// Remove a game and both chat links to it
    pub fn remove_game(&mut self, chat_id: ChatId) -> Result<(), LobbyError> {
        let id = self
            .chats
            .remove(&chat_id)
            .ok_or(LobbyError::UnknownChat { chat_id })?;
        if let Some(game) = self.games.remove(&id) {
            for player in &game.players {
                self.chats.remove(&player.chat_id);
            }
        }
        info!("Removed game {}", id);
        Ok(())
    }

    /// Whether somebody is already waiting for a game
    pub fn is_player_waiting(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn is_in_queue(&self, chat_id: ChatId) -> bool {
        self.queue.contains(chat_id)
    }

    pub fn remove_from_queue(&mut self, chat_id: ChatId) -> Option<WaitingPlayer> {
        self.queue.remove(chat_id)
    }

    pub fn queued_player(&self, chat_id: ChatId) -> Option<&WaitingPlayer> {
        self.queue.get(chat_id)
    }

    pub fn waiting(&self) -> usize {
        self.queue.len()
    }

    /// Number of running games
    pub fn active_games(&self) -> usize {
        self.games.len()
    }
}
