use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod arena;
mod config;
mod policy;

use crate::arena::{Arena, MatchReport};
use crate::config::{Config, Opponent};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level)?)
        .init();

    // Validate configuration
    config.validate()?;

    info!(
        "Starting arena: {} games per side, opponent {:?}",
        config.games, config.opponent
    );
    let opponent = config.opponent;
    let arena = Arc::new(Arena::new(config));

    // Stop between games on ctrl+c
    let shutdown_arena = Arc::clone(&arena);
    let shutdown_handle = tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received, stopping arena...");
            shutdown_arena.shutdown();
        }
    });

    let run_result = arena.run().await;
    shutdown_handle.abort();

    match run_result.and_then(|reports| check_reports(&reports, opponent)) {
        Ok(()) => {
            info!("Arena completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Arena failed: {}", e);
            Err(e)
        }
    }
}

/// Log every report and fail if the search did worse than expected
fn check_reports(reports: &[MatchReport], opponent: Opponent) -> Result<()> {
    for report in reports {
        info!(
            "Minimax as {}: {} wins, {} losses, {} draws (win rate {:.2})",
            report.side,
            report.wins,
            report.losses,
            report.draws,
            report.win_rate()
        );
        let timings: Vec<String> = report
            .mean_search_ms()
            .into_iter()
            .map(|(ply, ms)| format!("ply {}: {:.3} ms", ply, ms))
            .collect();
        info!("Mean search time as {}: {}", report.side, timings.join(", "));
    }

    let losses: u32 = reports.iter().map(|report| report.losses).sum();
    if losses > 0 {
        return Err(anyhow!("Minimax lost {} games", losses));
    }

    // perfect play against itself can only draw
    if opponent == Opponent::Minimax {
        let decided: u32 = reports.iter().map(|report| report.wins).sum();
        if decided > 0 {
            return Err(anyhow!("Minimax self-play produced {} decided games", decided));
        }
    }

    Ok(())
}
