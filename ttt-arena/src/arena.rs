use anyhow::{anyhow, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, warn};
use ttt_core::{GameConductor, Mark, Outcome};

use crate::config::Config;
use crate::policy::{self, MinimaxPolicy, Policy};

/// Result of one finished game
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub outcome: Outcome,
    /// Search time per ply (1-based) of every minimax move
    pub search_times: Vec<(usize, Duration)>,
}

/// Aggregated results of the minimax policy playing one mark
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub side: Mark,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    search_total: [Duration; 9],
    search_count: [u32; 9],
}

impl MatchReport {
    pub fn new(side: Mark) -> Self {
        Self {
            side,
            wins: 0,
            losses: 0,
            draws: 0,
            search_total: [Duration::ZERO; 9],
            search_count: [0; 9],
        }
    }

    pub fn record(&mut self, game: &GameRecord) {
        match game.outcome {
            Outcome::Winner(mark) if mark == self.side => self.wins += 1,
            Outcome::Winner(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
        for &(ply, elapsed) in &game.search_times {
            if let Some(slot) = ply.checked_sub(1).filter(|&i| i < 9) {
                self.search_total[slot] += elapsed;
                self.search_count[slot] += 1;
            }
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    pub fn win_rate(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            games => f64::from(self.wins) / f64::from(games),
        }
    }

    /// Mean search time in milliseconds for every ply the search played
    pub fn mean_search_ms(&self) -> Vec<(usize, f64)> {
        self.search_total
            .iter()
            .zip(self.search_count.iter())
            .enumerate()
            .filter(|(_, (_, count))| **count > 0)
            .map(|(i, (total, &count))| (i + 1, total.as_secs_f64() * 1_000.0 / f64::from(count)))
            .collect()
    }
}

pub struct Arena {
    config: Config,
    shutdown_signal: AtomicBool,
}

impl Arena {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            shutdown_signal: AtomicBool::new(false),
        }
    }

    pub async fn run(&self) -> Result<Vec<MatchReport>> {
        let mut reports = Vec::new();

        for side in self.config.sides() {
            info!(
                "Minimax plays {} against {:?} for {} games",
                side, self.config.opponent, self.config.games
            );
            let mut report = MatchReport::new(side);

            for game_index in 0..self.config.games {
                if self.shutdown_signal.load(Ordering::SeqCst) {
                    info!("Shutdown signal received, stopping arena");
                    reports.push(report);
                    return Ok(reports);
                }

                let record = self.run_game(side, game_index).await?;
                debug!("Game {} as {} ended with {:?}", game_index + 1, side, record.outcome);
                report.record(&record);

                if report.games() % 10 == 0 {
                    debug!("Completed {} games as {}", report.games(), side);
                }
            }

            reports.push(report);
        }

        Ok(reports)
    }

    pub fn shutdown(&self) {
        self.shutdown_signal.store(true, Ordering::SeqCst);
        info!("Shutdown signal set");
    }

    async fn run_game(&self, side: Mark, game_index: u32) -> Result<GameRecord> {
        // distinct stream per side so both runs do not replay the same games
        let seed = self.config.seed.map(|seed| {
            let side_offset = if side == Mark::Cross { 0 } else { 1 << 32 };
            seed.wrapping_add(side_offset + u64::from(game_index))
        });
        let opponent = policy::opponent(self.config.opponent, seed);

        let task = tokio::task::spawn_blocking(move || play_game(side, opponent));
        timeout(self.config.game_timeout(), task)
            .await
            .map_err(|_| anyhow!("Game {} as {} timed out", game_index + 1, side))?
            .map_err(|e| anyhow!("Game {} as {} panicked: {}", game_index + 1, side, e))?
    }
}

/// Play one game of the search as `side` against `opponent`
pub fn play_game(side: Mark, mut opponent: Box<dyn Policy>) -> Result<GameRecord> {
    let game = GameConductor::new();
    let searcher = game.issue_handle(Some(side), false)?;
    let other = game.issue_handle(None, true)?;
    let mut minimax = MinimaxPolicy;
    let mut search_times = Vec::new();

    while !game.is_game_over() {
        let board = game.board();
        if searcher.is_my_turn() {
            let ply = 10 - board.count_empty();
            let started = Instant::now();
            let mv = minimax.select_move(&board, searcher.mark())?;
            search_times.push((ply, started.elapsed()));
            searcher.submit(mv)?;
        } else if other.is_my_turn() {
            let mv = opponent.select_move(&board, other.mark())?;
            other.submit(mv)?;
        } else {
            return Err(anyhow!("Nobody is allowed to move in a running game"));
        }
    }

    let outcome = game.result()?;
    if outcome == Outcome::Winner(other.mark()) {
        warn!("Minimax as {} lost to {}:\n{}", side, opponent.name(), game.board());
    }
    Ok(GameRecord {
        outcome,
        search_times,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Opponent;
    use clap::Parser;

    fn test_config(args: &[&str]) -> Config {
        let mut argv = vec!["ttt-arena"];
        argv.extend_from_slice(args);
        Config::parse_from(argv)
    }

    #[test]
    fn test_report_counts() {
        let mut report = MatchReport::new(Mark::Nought);
        report.record(&GameRecord {
            outcome: Outcome::Winner(Mark::Nought),
            search_times: vec![(2, Duration::from_millis(4)), (4, Duration::from_millis(2))],
        });
        report.record(&GameRecord {
            outcome: Outcome::Draw,
            search_times: vec![(2, Duration::from_millis(2))],
        });
        report.record(&GameRecord {
            outcome: Outcome::Winner(Mark::Cross),
            search_times: vec![],
        });

        assert_eq!((report.wins, report.draws, report.losses), (1, 1, 1));
        assert_eq!(report.games(), 3);
        assert!((report.win_rate() - 1.0 / 3.0).abs() < 1e-9);

        let means = report.mean_search_ms();
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].0, 2);
        assert!((means[0].1 - 3.0).abs() < 1e-9);
        assert_eq!(means[1].0, 4);
    }

    #[test]
    fn test_play_game_plies() {
        let record = play_game(Mark::Cross, Box::new(MinimaxPolicy)).unwrap();
        assert_eq!(record.outcome, Outcome::Draw);
        let plies: Vec<usize> = record.search_times.iter().map(|&(ply, _)| ply).collect();
        assert_eq!(plies, vec![1, 3, 5, 7, 9]);
    }

    #[tokio::test]
    async fn test_arena_never_loses_to_random() {
        let arena = Arena::new(test_config(&["--games", "20", "--seed", "11"]));
        let reports = arena.run().await.unwrap();

        assert_eq!(reports.len(), 2);
        for report in &reports {
            assert_eq!(report.games(), 20);
            assert_eq!(report.losses, 0, "lost as {}", report.side);
        }
        assert_eq!(reports[0].side, Mark::Cross);
        assert_eq!(reports[1].side, Mark::Nought);
    }

    #[tokio::test]
    async fn test_arena_self_play_draws() {
        let config = test_config(&["--games", "2", "--opponent", "minimax"]);
        assert_eq!(config.opponent, Opponent::Minimax);
        let reports = Arena::new(config).run().await.unwrap();
        assert!(reports.iter().all(|report| report.draws == 2));
    }

    #[tokio::test]
    async fn test_shutdown_stops_early() {
        let arena = Arena::new(test_config(&["--games", "5", "--seed", "1"]));
        arena.shutdown();
        let reports = arena.run().await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].games(), 0);
    }
}
