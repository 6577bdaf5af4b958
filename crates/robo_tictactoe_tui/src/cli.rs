//! Command-line interface for robo_tictactoe.

use crate::config::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Robo Tic-Tac-Toe - beat the robot in your terminal
#[derive(Parser, Debug)]
#[command(name = "robo_tictactoe")]
#[command(about = "Play tic-tac-toe against a heuristic robot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play a session against the computer
    Play {
        /// Path to the TOML config file (defaults apply if it doesn't exist)
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Override the computer's reply delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Seed the computer's random fallback for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the default configuration as TOML
    DefaultConfig,
}

impl Default for Command {
    fn default() -> Self {
        Command::Play {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            delay_ms: None,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_play_with_defaults() {
        let cli = Cli::try_parse_from(["robo_tictactoe"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Command::default());
    }

    #[test]
    fn test_play_overrides() {
        let cli = Cli::try_parse_from([
            "robo_tictactoe",
            "play",
            "--config",
            "custom.toml",
            "--delay-ms",
            "0",
            "--seed",
            "9",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Play {
                config: PathBuf::from("custom.toml"),
                delay_ms: Some(0),
                seed: Some(9),
            })
        );
    }

    #[test]
    fn test_default_config_subcommand() {
        let cli = Cli::try_parse_from(["robo_tictactoe", "default-config"]).unwrap();
        assert_eq!(cli.command, Some(Command::DefaultConfig));
    }
}
