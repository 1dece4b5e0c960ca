use ratatui::{
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use super::{header_style, selected_style};
use crate::app::App;
use crate::models::HostEntry;

/// Rows above the first entry: title, blank line, column header.
pub const HEADER_ROWS: u16 = 3;

/// Draws the whole menu from scratch and parks the cursor at row 1,
/// column 0.
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.size();

    let mut lines = Vec::with_capacity(app.store.count() + HEADER_ROWS as usize);
    lines.push(Line::raw(app.program.as_str()));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format_row("NUM", "NAME", "USER", "HOST", "DESCRIPTION"),
        header_style(),
    )));

    for (i, entry) in app.store.iter().enumerate() {
        let position = i + 1;
        let row = entry_row(position, entry);
        if position == app.state.selected {
            lines.push(Line::from(Span::styled(row, selected_style())));
        } else {
            lines.push(Line::raw(row));
        }
    }

    f.render_widget(Paragraph::new(lines), area);
    f.set_cursor(area.x, area.y + 1.min(area.height.saturating_sub(1)));
}

fn entry_row(position: usize, entry: &HostEntry) -> String {
    format_row(
        &position.to_string(),
        &entry.name,
        &entry.user,
        &entry.host,
        &entry.descr,
    )
}

fn format_row(num: &str, name: &str, user: &str, host: &str, descr: &str) -> String {
    format!(
        " {num:>4} {} {} {} {}",
        fit(name, 16),
        fit(user, 16),
        fit(host, 32),
        fit(descr, 32)
    )
}

/// Cuts or pads `text` to exactly `width` terminal columns. A wide
/// character that would straddle the edge is dropped and replaced by
/// padding.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}
