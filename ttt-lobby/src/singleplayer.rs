//! Games of one player against a bot
//!
//! Every chat holds at most one session. The bot answers each accepted human
//! move right away, and moves first when it plays `Cross`.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};
use ttt_core::{
    find_optimal_move, random_available_move, Board, GameConductor, Mark, Move, Outcome,
};

use crate::error::LobbyError;
use crate::ChatId;

/// How the bot picks its moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotLevel {
    /// Uniformly random legal move
    Random,
    /// Optimal move from the full game tree search
    #[default]
    Optimal,
}

/// What happened during one call into a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub human_move: Option<Move>,
    pub bot_move: Option<Move>,
    pub board: Board,
    /// Set once the game is over
    pub outcome: Option<Outcome>,
}

#[derive(Debug)]
struct Session {
    conductor: GameConductor,
    human: Mark,
    bot: Mark,
    level: BotLevel,
}

impl Session {
    fn report(&self, human_move: Option<Move>, bot_move: Option<Move>) -> TurnReport {
        TurnReport {
            human_move,
            bot_move,
            board: self.conductor.board(),
            outcome: self.conductor.result().ok(),
        }
    }
}

/// Singleplayer sessions keyed by chat
#[derive(Debug)]
pub struct Singleplayer {
    sessions: HashMap<ChatId, Session>,
    rng: ChaCha20Rng,
}

impl Singleplayer {
    pub fn new() -> Self {
        Self::with_rng(ChaCha20Rng::from_entropy())
    }

    /// Create sessions whose random bot is reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha20Rng) -> Self {
        Self {
            sessions: HashMap::new(),
            rng,
        }
    }

    /// Start a game for a chat
    ///
    /// The player gets `human_mark` (`Cross` when omitted) and the bot the
    /// other one. If the bot plays `Cross` its opening move is in the report.
    pub fn start(
        &mut self,
        chat_id: ChatId,
        human_mark: Option<Mark>,
        level: BotLevel,
    ) -> Result<TurnReport, LobbyError> {
        if self.sessions.contains_key(&chat_id) {
            return Err(LobbyError::CurrentGame { chat_id });
        }

        let conductor = GameConductor::new();
        let human = conductor.issue_handle(human_mark, false)?.mark();
        let bot = conductor.issue_handle(None, true)?.mark();
        let session = Session {
            conductor,
            human,
            bot,
            level,
        };
        info!("Chat {} plays {} against a {:?} bot", chat_id, human, level);

        let bot_move = bot_turn(&session, &mut self.rng)?;
        let report = session.report(None, bot_move);
        self.sessions.insert(chat_id, session);
        Ok(report)
    }

    /// Apply the player's move, then the bot's reply if the game goes on
    ///
    /// The session stays around after the game ends so the final board can be
    /// shown; call [`Singleplayer::finish`] to drop it.
    pub fn play(&mut self, chat_id: ChatId, mv: Move) -> Result<TurnReport, LobbyError> {
        let session = self
            .sessions
            .get(&chat_id)
            .ok_or(LobbyError::UnknownChat { chat_id })?;

        session.conductor.apply_move(mv, session.human)?;
        let bot_move = bot_turn(session, &mut self.rng)?;
        Ok(session.report(Some(mv), bot_move))
    }

    /// Drop the session of a chat
    pub fn finish(&mut self, chat_id: ChatId) -> Result<(), LobbyError> {
        if self.sessions.remove(&chat_id).is_none() {
            return Err(LobbyError::UnknownChat { chat_id });
        }
        info!("Chat {} left its game", chat_id);
        Ok(())
    }

    /// The running game of a chat
    pub fn session(&self, chat_id: ChatId) -> Option<&GameConductor> {
        self.sessions.get(&chat_id).map(|session| &session.conductor)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for Singleplayer {
    fn default() -> Self {
        Self::new()
    }
}

fn bot_turn(session: &Session, rng: &mut ChaCha20Rng) -> Result<Option<Move>, LobbyError> {
    let conductor = &session.conductor;
    if !conductor.is_turn_of(session.bot) {
        return Ok(None);
    }

    let board = conductor.board();
    let choice = match session.level {
        BotLevel::Random => random_available_move(&board, rng),
        BotLevel::Optimal => find_optimal_move(&board, session.bot),
    };
    if let Some(mv) = choice {
        conductor.apply_move(mv, session.bot)?;
        debug!("Bot ({}) answered {}", session.bot, mv);
    }
    Ok(choice)
}
