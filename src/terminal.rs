use std::{
    io::{self, Stdout},
    ops::{Deref, DerefMut},
    sync::atomic::{AtomicBool, Ordering},
};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::{MenuError, Result};

/// Set while raw mode and the alternate screen are in effect. Whoever
/// clears it first restores the terminal; everyone else does nothing.
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Owns the interactive terminal for the lifetime of the menu.
pub struct Tui {
    inner: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn enter() -> Result<Self> {
        if ACTIVE.swap(true, Ordering::SeqCst) {
            return Err(MenuError::TerminalInit(io::Error::other(
                "terminal is already initialized",
            )));
        }

        Self::setup().map_err(|e| {
            let _ = restore_terminal();
            MenuError::TerminalInit(e)
        })
    }

    fn setup() -> io::Result<Self> {
        enable_raw_mode()?;
        install_panic_hook();

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let mut inner = Terminal::new(CrosstermBackend::new(stdout))?;
        inner.clear()?;
        tracing::debug!("Terminal initialized");
        Ok(Self { inner })
    }

    /// Returns the terminal to cooked mode on the main screen. Only the
    /// first call does anything.
    pub fn restore(&mut self) -> Result<()> {
        restore_terminal()?;
        Ok(())
    }
}

fn restore_terminal() -> io::Result<()> {
    if !ACTIVE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }

    let raw = disable_raw_mode();
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    tracing::debug!("Terminal restored");
    raw
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));
}

impl Deref for Tui {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}
