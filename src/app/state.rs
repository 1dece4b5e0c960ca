use ratatui::{backend::Backend, Terminal};

use crate::app::keymap;
use crate::app::types::{App, Flow, Input, Outcome, UiState};
use crate::error::Result;
use crate::events::EventSource;
use crate::store::EntryStore;
use crate::ui;

/// Applies one input to the menu state.
///
/// Moves are clamped to `[1, entry_count]` and only mark the state dirty
/// when the selection actually changes.
pub fn step(mut state: UiState, input: Input, entry_count: usize) -> (UiState, Flow) {
    match input {
        Input::Resize => state.dirty = true,
        Input::Down => {
            if state.selected < entry_count {
                state.selected += 1;
                state.dirty = true;
            }
        }
        Input::Up => {
            if state.selected > 1 {
                state.selected -= 1;
                state.dirty = true;
            }
        }
        Input::Confirm => return (state, Flow::Confirm),
        Input::Quit => {
            state.quit = true;
            return (state, Flow::Quit);
        }
        Input::Mouse | Input::Other => {}
    }
    (state, Flow::Continue)
}

impl App {
    pub fn new(program: String, store: EntryStore) -> Self {
        Self {
            program,
            store,
            state: UiState::default(),
        }
    }

    /// Paints once, then handles events until Enter or the quit key.
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut impl EventSource,
    ) -> Result<Outcome> {
        self.render(terminal)?;

        loop {
            let event = events.next_event()?;
            let input = keymap::input_for(&event);
            let (state, flow) = step(self.state, input, self.store.count());
            self.state = state;

            match flow {
                Flow::Continue => {}
                Flow::Confirm => {
                    tracing::info!("Confirmed entry {}", self.state.selected);
                    return Ok(Outcome::Launch(self.state.selected));
                }
                Flow::Quit => {
                    tracing::info!("Quit without selecting");
                    return Ok(Outcome::Quit);
                }
            }

            if self.state.dirty {
                self.render(terminal)?;
                self.state.dirty = false;
            }
        }
    }

    fn render<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        tracing::debug!("Repainting, selected = {}", self.state.selected);
        terminal.draw(|f| ui::draw(f, self))?;
        Ok(())
    }
}
