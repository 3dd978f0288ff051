//! Command-line interface for the Hare and Hounds client.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hare and Hounds - three hounds try to corner one hare
#[derive(Parser, Debug)]
#[command(name = "hare_hounds")]
#[command(about = "Play Hare and Hounds in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the client config file
    #[arg(short, long, global = true, default_value = "hare_hounds.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a hot-seat match on this terminal
    Play {
        /// Name of the hounds player (defaults to the configured name)
        #[arg(long)]
        hounds: Option<String>,

        /// Name of the hare player
        #[arg(long, default_value = "Opponent")]
        hare: String,
    },

    /// Print the board graph with coordinates
    Topology,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play() {
        let cli = Cli::parse_from(["hare_hounds", "play", "--hounds", "Ana", "--hare", "Bia"]);
        match cli.command {
            Command::Play { hounds, hare } => {
                assert_eq!(hounds.as_deref(), Some("Ana"));
                assert_eq!(hare, "Bia");
            }
            Command::Topology => panic!("expected play"),
        }
        assert_eq!(cli.config, PathBuf::from("hare_hounds.toml"));
    }

    #[test]
    fn test_parse_topology_with_config() {
        let cli = Cli::parse_from(["hare_hounds", "topology", "--config", "other.toml"]);
        assert!(matches!(cli.command, Command::Topology));
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }
}
