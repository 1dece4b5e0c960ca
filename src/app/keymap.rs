use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Input;

pub const QUIT_KEY: KeyCode = KeyCode::F(1);

pub fn input_for(event: &Event) -> Input {
    match event {
        Event::Resize(..) => Input::Resize,
        Event::Mouse(_) => Input::Mouse,
        Event::Key(key) if key.kind == KeyEventKind::Press => key_input(key),
        _ => Input::Other,
    }
}

fn key_input(key: &KeyEvent) -> Input {
    match key.code {
        QUIT_KEY => Input::Quit,
        // Raw mode swallows SIGINT, so Ctrl-C has to be handled here.
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Input::Quit,
        KeyCode::Up => Input::Up,
        KeyCode::Down => Input::Down,
        KeyCode::Enter => Input::Confirm,
        _ => Input::Other,
    }
}
