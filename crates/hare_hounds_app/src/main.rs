//! Hare and Hounds - terminal client

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use hare_hounds::{Board, MatchStatus};
use hare_hounds_app::cli::{Cli, Command};
use hare_hounds_app::render::render_topology;
use hare_hounds_app::{AppConfig, HotSeat, run_hot_seat};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?.with_env_overrides();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(config = %cli.config.display(), "Starting Hare and Hounds");

    match cli.command {
        Command::Play { hounds, hare } => run_play(&config, hounds, hare).await,
        Command::Topology => run_topology(&config),
    }
}

/// Run a hot-seat match on stdin/stdout
#[instrument(skip(config))]
async fn run_play(config: &AppConfig, hounds: Option<String>, hare: String) -> Result<()> {
    let hounds = hounds.unwrap_or_else(|| config.player_name().clone());
    let settings = HotSeat::new(hounds, hare, *config.layout());

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    let status = run_hot_seat(&settings, input, &mut out).await?;

    match status {
        MatchStatus::Finished => info!("Match finished"),
        MatchStatus::Abandoned => info!("Match abandoned"),
        other => info!(status = ?other, "Session ended before the match did"),
    }
    Ok(())
}

/// Print the node table
#[instrument(skip(config))]
fn run_topology(config: &AppConfig) -> Result<()> {
    let board = Board::with_layout(*config.layout());
    println!("{}", render_topology(&board));
    Ok(())
}
