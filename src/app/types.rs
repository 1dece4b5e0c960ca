use crate::store::EntryStore;

/// Selection and repaint bookkeeping for the menu.
///
/// `selected` is the 1-based position of the highlighted entry and always
/// stays within `[1, entry count]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub selected: usize,
    pub dirty: bool,
    pub quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selected: 1,
            dirty: false,
            quit: false,
        }
    }
}

/// What a terminal event means to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Resize,
    Mouse,
    Up,
    Down,
    Confirm,
    Quit,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Confirm,
    Quit,
}

/// How the interactive loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Enter was pressed on this 1-based position.
    Launch(usize),
    Quit,
}

#[derive(Debug)]
pub struct App {
    /// Shown on the title line.
    pub program: String,
    pub store: EntryStore,
    pub state: UiState,
}
