use std::io;

use crossterm::event::{self, Event};

/// Blocking source of terminal events.
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<Event>;
}

/// Reads from the real terminal, waiting as long as it takes.
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Replays a fixed script, then fails with `UnexpectedEof`.
#[cfg(test)]
impl EventSource for std::collections::VecDeque<Event> {
    fn next_event(&mut self) -> io::Result<Event> {
        self.pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "event script exhausted"))
    }
}
