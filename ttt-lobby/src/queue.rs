//! Queue of players waiting for a multiplayer game

use std::collections::VecDeque;

use crate::{ChatId, MessageId};

/// Player waiting for an opponent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingPlayer {
    pub chat_id: ChatId,
    /// Message that shows the board to this player
    pub message_id: MessageId,
    pub user_name: String,
}

impl WaitingPlayer {
    pub fn new(chat_id: ChatId, message_id: MessageId, user_name: impl Into<String>) -> Self {
        Self {
            chat_id,
            message_id,
            user_name: user_name.into(),
        }
    }
}

/// FIFO of waiting players keyed by chat id
#[derive(Debug, Clone, Default)]
pub struct PlayersQueue {
    players: VecDeque<WaitingPlayer>,
}

impl PlayersQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player at the back of the queue
    pub fn enqueue(&mut self, player: WaitingPlayer) {
        self.players.push_back(player);
    }

    /// Take the player who has waited longest
    pub fn dequeue(&mut self) -> Option<WaitingPlayer> {
        self.players.pop_front()
    }

    pub fn contains(&self, chat_id: ChatId) -> bool {
        self.get(chat_id).is_some()
    }

    pub fn get(&self, chat_id: ChatId) -> Option<&WaitingPlayer> {
        self.players.iter().find(|player| player.chat_id == chat_id)
    }

    /// Remove a player wherever it stands in the queue
    pub fn remove(&mut self, chat_id: ChatId) -> Option<WaitingPlayer> {
        let index = self
            .players
            .iter()
            .position(|player| player.chat_id == chat_id)?;
        self.players.remove(index)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = PlayersQueue::new();
        for id in 0..100 {
            queue.enqueue(WaitingPlayer::new(id, id * 1000, id.to_string()));
        }
        assert_eq!(queue.len(), 100);

        for id in 0..100 {
            let player = queue.dequeue().unwrap();
            assert_eq!(player.chat_id, id);
            assert_eq!(player.message_id, id * 1000);
        }
        assert!(queue.is_empty());
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_lookup_and_remove() {
        let mut queue = PlayersQueue::new();
        queue.enqueue(WaitingPlayer::new(-1, -1, "first"));
        queue.enqueue(WaitingPlayer::new(7, 70, "second"));

        assert!(queue.contains(-1));
        assert!(!queue.contains(3));
        assert_eq!(queue.get(7).map(|p| p.user_name.as_str()), Some("second"));
        assert_eq!(queue.len(), 2);

        let removed = queue.remove(-1).unwrap();
        assert_eq!(removed.message_id, -1);
        assert_eq!(queue.remove(-1), None);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dequeue().map(|p| p.chat_id), Some(7));
    }
}
