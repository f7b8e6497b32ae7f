use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ttt_core::Mark;

/// Mark(s) the minimax policy plays
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Cross,
    Nought,
    Both,
}

/// Policy facing the minimax player
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opponent {
    Random,
    Minimax,
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "ttt-arena")]
#[command(about = "Tic-Tac-Toe search arena")]
#[command(long_about = "Plays batches of games between the minimax search and an opponent policy.

Every game goes through the turn authority exactly like a chat game does.
The run fails if the search ever loses, and reports the mean search time
for every ply it played.")]
pub struct Config {
    /// Games to play for each side
    #[arg(long, env = "TTT_ARENA_GAMES", default_value = "50")]
    pub games: u32,

    /// Mark(s) played by the minimax policy
    #[arg(long, env = "TTT_ARENA_SIDE", value_enum, default_value = "both")]
    pub side: Side,

    /// Opponent policy
    #[arg(long, env = "TTT_ARENA_OPPONENT", value_enum, default_value = "random")]
    pub opponent: Opponent,

    /// Seed for the random opponent (entropy when omitted)
    #[arg(long, env = "TTT_ARENA_SEED")]
    pub seed: Option<u64>,

    /// Deadline per game in seconds
    #[arg(long, env = "TTT_ARENA_GAME_TIMEOUT", default_value = "10")]
    pub game_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TTT_ARENA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.game_timeout_secs == 0 {
            return Err(anyhow!("game_timeout_secs must be greater than 0"));
        }

        if self.log_level.is_empty() {
            return Err(anyhow!("log_level cannot be empty"));
        }

        Ok(())
    }

    pub fn game_timeout(&self) -> Duration {
        Duration::from_secs(self.game_timeout_secs)
    }

    /// Marks the minimax policy plays, in run order
    pub fn sides(&self) -> Vec<Mark> {
        match self.side {
            Side::Cross => vec![Mark::Cross],
            Side::Nought => vec![Mark::Nought],
            Side::Both => Mark::PLAYERS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["ttt-arena"]);
        assert_eq!(config.games, 50);
        assert_eq!(config.side, Side::Both);
        assert_eq!(config.opponent, Opponent::Random);
        assert_eq!(config.sides(), vec![Mark::Cross, Mark::Nought]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let config = Config::parse_from(["ttt-arena", "--games", "0"]);
        assert!(config.validate().is_err());

        let config = Config::parse_from(["ttt-arena", "--game-timeout-secs", "0"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_single_side() {
        let config = Config::parse_from(["ttt-arena", "--side", "nought", "--opponent", "minimax"]);
        assert_eq!(config.sides(), vec![Mark::Nought]);
        assert_eq!(config.opponent, Opponent::Minimax);
    }
}
