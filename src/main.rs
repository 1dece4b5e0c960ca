use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::ffi::OsString;
use std::fs::{self, File};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

mod app;
mod config;
mod error;
mod events;
mod models;
mod ssh_service;
mod store;
mod terminal;
mod ui;

use app::{App, Outcome};
use events::TerminalEvents;
use ssh_service::{Handoff, Launcher};
use store::EntryStore;
use terminal::Tui;

/// Pick a host from ~/.ssh/menu and connect to it, or open a local shell.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {}

fn main() -> ExitCode {
    Cli::parse();
    init_logging();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("ssh-menu: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let entries = match config::rc_path() {
        Some(path) => config::load_entries(&path).context("Could not read rc file.")?,
        None => {
            tracing::warn!("No home directory, only localhost is available");
            Vec::new()
        }
    };

    let program = program_name(std::env::args_os().next());
    let mut app = App::new(program, EntryStore::build(entries));

    let mut tui = Tui::enter()?;
    let result = app.run(&mut *tui, &mut TerminalEvents);
    let restored = tui.restore();
    drop(tui);

    // Nothing is reported until the terminal is back to normal.
    let outcome = result?;
    restored?;

    finish(outcome, &app.store, &mut Launcher::new())
}

/// Title for the menu. argv[0] need not be UTF-8.
fn program_name(arg0: Option<OsString>) -> String {
    arg0.map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ssh-menu".to_string())
}

/// Quitting exits with failure; a confirmed entry is handed off and only
/// comes back if the hand-off failed.
fn finish<H: Handoff>(
    outcome: Outcome,
    store: &EntryStore,
    launcher: &mut Launcher<H>,
) -> Result<ExitCode> {
    match outcome {
        Outcome::Quit => Ok(ExitCode::FAILURE),
        Outcome::Launch(selected) => {
            launcher.launch(store, selected)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Logs go to a timestamped file so they never touch the menu. Setup is
/// best-effort: without a writable cache dir the program runs unlogged.
fn init_logging() {
    let Some(log_dir) = dirs::cache_dir().map(|dir| dir.join("ssh-menu").join("logs")) else {
        return;
    };
    if fs::create_dir_all(&log_dir).is_err() {
        return;
    }

    let log_file = log_dir.join(format!(
        "ssh-menu_{}.log",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    let Ok(file) = File::create(&log_file) else {
        return;
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "ssh_menu=debug".parse() {
        filter = filter.add_directive(directive);
    }

    let _ = fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    tracing::debug!("Logging to {:?}", log_file);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use ssh_service::{LaunchCommand, RecordingHandoff};
    use std::collections::VecDeque;
    use std::io::Write;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn launcher() -> Launcher<RecordingHandoff> {
        Launcher::with_handoff("/bin/sh".into(), RecordingHandoff::default())
    }

    fn pick(store: EntryStore, keys: &[KeyCode]) -> Outcome {
        let mut app = App::new("ssh-menu".into(), store);
        let mut terminal = Terminal::new(TestBackend::new(120, 10)).unwrap();
        let mut events: VecDeque<Event> = keys.iter().copied().map(key).collect();
        app.run(&mut terminal, &mut events).unwrap()
    }

    #[test]
    fn two_records_with_comment_launch_second_target() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "web\nweb01\ndeploy\nFront end\nweb.example.org\n10.0.0.5\n\n\
             ; database hosts below\n\
             db\ndb01\nadmin\nDatabase\n\n10.0.0.9\n~/.ssh/db\n"
        )
        .unwrap();

        let store = EntryStore::build(config::load_entries(file.path()).unwrap());
        assert_eq!(store.count(), 3);

        let outcome = pick(store.clone(), &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        assert_eq!(outcome, Outcome::Launch(3));

        let mut launcher = launcher();
        assert_eq!(finish(outcome, &store, &mut launcher).unwrap(), ExitCode::SUCCESS);
        assert_eq!(
            launcher.handoff().launched,
            [LaunchCommand {
                program: "ssh".into(),
                args: vec!["-i".into(), "~/.ssh/db".into(), "admin@10.0.0.9".into()],
            }]
        );
    }

    #[test]
    fn absent_config_launches_local_shell() {
        let dir = tempfile::tempdir().unwrap();
        let store = EntryStore::build(config::load_entries(&dir.path().join("menu")).unwrap());
        assert_eq!(store.count(), 1);

        let outcome = pick(store.clone(), &[KeyCode::Enter]);
        let mut launcher = launcher();
        assert_eq!(finish(outcome, &store, &mut launcher).unwrap(), ExitCode::SUCCESS);
        assert_eq!(launcher.handoff().launched, [LaunchCommand::shell("/bin/sh")]);
    }

    #[test]
    fn quitting_exits_with_failure_and_launches_nothing() {
        let store = EntryStore::with_login(Vec::new(), None);
        let outcome = pick(store.clone(), &[KeyCode::Down, KeyCode::F(1)]);
        assert_eq!(outcome, Outcome::Quit);

        let mut launcher = launcher();
        assert_eq!(finish(outcome, &store, &mut launcher).unwrap(), ExitCode::FAILURE);
        assert!(launcher.handoff().launched.is_empty());
    }

    #[test]
    fn malformed_config_is_reported_with_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "web\nweb01\n").unwrap();

        let err = config::load_entries(file.path())
            .context("Could not read rc file.")
            .unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "Could not read rc file.: Invalid input file (count = 2)"
        );
    }

    #[cfg(unix)]
    #[test]
    fn program_name_accepts_non_utf8_argv0() {
        use std::os::unix::ffi::OsStringExt;

        let arg0 = OsString::from_vec(b"ssh-m\xffenu".to_vec());
        assert_eq!(program_name(Some(arg0)), "ssh-m\u{fffd}enu");
        assert_eq!(program_name(None), "ssh-menu");
    }
}
