//! cite - citation form
//!
//! Terminal form that turns a JSON source record into APA, MLA, Chicago,
//! Harvard, IEEE or Vancouver citations. Subcommands expose the same
//! formatting for scripts.

mod app;
mod cli;
mod clipboard;
mod config;
mod error;
mod form;
mod keybindings;
mod logging;
mod mode;
mod widgets;

use std::io::{self, Stdout};
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use app::App;
use cli::{Cli, Command};
use clipboard::SystemClipboard;
use config::Config;
use logging::LogTarget;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> error::Result<bool> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        None | Some(Command::Tui) => {
            if let Some(path) = config.log_file.clone().or_else(logging::default_log_file) {
                logging::init(&LogTarget::File(path));
            }
            run_tui(&config)?;
            Ok(true)
        }
        Some(command) => {
            logging::init(&LogTarget::Stderr);
            cli::run_command(
                &command,
                &config,
                &mut io::stdin().lock(),
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            )
        }
    }
}

fn run_tui(config: &Config) -> io::Result<()> {
    let mut terminal = setup_terminal()?;

    info!(style = %config.default_style, "starting citation form");
    let clipboard = config
        .clipboard
        .as_deref()
        .and_then(SystemClipboard::from_command_line)
        .unwrap_or_else(SystemClipboard::detect);
    let mut app = App::new(config, clipboard);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let terminal = execute!(stdout, EnterAlternateScreen)
        .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)));
    restore_on_err(terminal, || {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })
}

/// Run `restore` if `result` is an error, then hand the result back.
fn restore_on_err<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<SystemClipboard>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_restores_terminal() {
        let restored = Cell::new(false);
        let result: io::Result<()> = restore_on_err(
            Err(io::Error::new(io::ErrorKind::Other, "no tty")),
            || restored.set(true),
        );
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_successful_setup_leaves_terminal() {
        let restored = Cell::new(false);
        let result = restore_on_err(Ok(7), || restored.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }
}
