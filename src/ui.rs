use ratatui::style::{Color, Style};

mod hosts_list;

pub use hosts_list::draw;

pub const HEADER_BG: Color = Color::Green;
pub const SELECTED_BG: Color = Color::Cyan;

fn header_style() -> Style {
    Style::default().fg(Color::Black).bg(HEADER_BG)
}

fn selected_style() -> Style {
    Style::default().fg(Color::Black).bg(SELECTED_BG)
}
