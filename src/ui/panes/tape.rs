//! Tape pane rendering

use crate::interpreter::tape::Tape;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Printable form of a cell value for the character column
fn cell_char(value: u8) -> String {
    if value.is_ascii_graphic() || value == b' ' {
        format!("'{}'", value as char)
    } else {
        format!("'\\x{:02x}'", value)
    }
}

/// Render a window of tape cells centered on the data pointer.
///
/// `offset` shifts the window away from the data pointer (scrolling in the
/// focused pane); it is clamped so the window stays on the tape.
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    tape: &Tape,
    data_pointer: usize,
    is_focused: bool,
    offset: &mut isize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Tape (dp = {}) ", data_pointer))
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let radius = visible_height.saturating_sub(1) / 2;

    let last = tape.len() as isize - 1;
    let center = (data_pointer as isize + *offset).clamp(0, last);
    *offset = center - data_pointer as isize;

    let lines: Vec<Line> = tape
        .window(center as usize, radius)
        .map(|(index, value)| {
            let is_current = index == data_pointer;
            let marker = if is_current { "▶" } else { " " };
            let value_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else if value != 0 {
                Style::default().fg(DEFAULT_THEME.nonzero_cell)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            let row_style = if is_current {
                Style::default().bg(DEFAULT_THEME.current_line_bg)
            } else {
                Style::default()
            };

            Line::from(vec![
                Span::styled(format!("{} ", marker), Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(format!("{:>6} ", index), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(format!("{:>3} ", value), value_style),
                Span::styled(cell_char(value), value_style),
            ])
            .style(row_style)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
