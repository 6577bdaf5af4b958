//! Robo Tic-Tac-Toe - terminal front end for the rule engine.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod announcement;
mod app;
mod cli;
mod config;
mod input;
mod opponent;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

use app::{App, KeyOutcome};
use cli::{Cli, Command};
use config::TuiConfig;
use opponent::{ComputerPlayer, GameEvent, TurnRequest};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        Command::Play {
            config,
            delay_ms,
            seed,
        } => run_play(config, delay_ms, seed).await,
        Command::DefaultConfig => {
            print!("{}", TuiConfig::default().to_toml()?);
            Ok(())
        }
    }
}

/// Runs an interactive session against the computer.
async fn run_play(config_path: PathBuf, delay_ms: Option<u64>, seed: Option<u64>) -> Result<()> {
    let config = TuiConfig::load_or_default(&config_path)?.with_overrides(delay_ms, seed);
    initialize_tracing(&config)?;

    info!(
        config = %config_path.display(),
        delay_ms = config.computer_delay_ms(),
        seed = ?config.seed(),
        "Starting Robo Tic-Tac-Toe"
    );

    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let computer = ComputerPlayer::new(*config.seed(), config.computer_delay());
    let opponent_handle = tokio::spawn(computer.run(request_rx, event_tx));

    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            opponent_handle.abort();
            error!(error = ?e, "Failed to set up terminal");
            return Err(e);
        }
    };

    let res = run_app(&mut terminal, App::new(), request_tx, &mut event_rx).await;

    opponent_handle.abort();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Session ended");
    res
}

/// Enters raw mode and the alternate screen, undoing both if any step fails.
fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    with_teardown(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        },
        || {
            let mut stdout = io::stdout();
            let _ = execute!(stdout, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )
}

/// Runs `setup`, calling `teardown` only when it fails.
fn with_teardown<T>(setup: impl FnOnce() -> Result<T>, teardown: impl FnOnce()) -> Result<T> {
    let result = setup();
    if result.is_err() {
        teardown();
    }
    result
}

/// Draw, drain opponent events, forward computer turns, read one key.
#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Tui,
    mut app: App,
    request_tx: mpsc::UnboundedSender<TurnRequest>,
    event_rx: &mut mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }

        if let Some(request) = app.take_turn_request() {
            request_tx
                .send(request)
                .context("Computer opponent stopped")?;
        }

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key.code) == KeyOutcome::Quit
        {
            info!("User quit");
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}

/// Sends tracing output to the configured log file so it never draws over the UI.
fn initialize_tracing(config: &TuiConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file()).with_context(|| {
        format!("Failed to create log file {}", config.log_file().display())
    })?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_teardown_runs_when_setup_fails() {
        let torn_down = Cell::new(false);
        let result: Result<()> =
            with_teardown(|| anyhow::bail!("no tty"), || torn_down.set(true));
        assert!(result.is_err());
        assert!(torn_down.get());
    }

    #[test]
    fn test_teardown_skipped_on_success() {
        let torn_down = Cell::new(false);
        let result = with_teardown(|| Ok(7), || torn_down.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!torn_down.get());
    }
}
