use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    /// Non-comment newline count is not a multiple of the record size.
    #[error("Invalid input file (count = {count})")]
    MalformedConfig { count: usize },

    #[error("Failed to initialize terminal")]
    TerminalInit(#[source] io::Error),

    #[error("Terminal error")]
    Terminal(#[from] io::Error),

    #[error("No entry at position {0}")]
    NoSuchEntry(usize),

    #[error("Failed to execute {program}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = MenuError> = std::result::Result<T, E>;
