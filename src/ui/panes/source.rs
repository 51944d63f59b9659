//! Program pane rendering
//!
//! Shows the filtered instruction stream wrapped to the pane width, colored by
//! instruction kind, with the next instruction to execute highlighted.

use crate::parser::{Instruction, Program};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn instruction_style(instruction: Instruction) -> Style {
    let color = match instruction {
        Instruction::Right | Instruction::Left => DEFAULT_THEME.pointer,
        Instruction::Increment | Instruction::Decrement => DEFAULT_THEME.arithmetic,
        Instruction::Output | Instruction::Input => DEFAULT_THEME.io,
        Instruction::LoopStart | Instruction::LoopEnd => DEFAULT_THEME.bracket,
    };
    Style::default().fg(color)
}

/// Render the program pane.
///
/// When `follow` is set the scroll offset is adjusted so the row holding
/// `current` stays visible.
pub fn render_program_pane(
    frame: &mut Frame,
    area: Rect,
    program: &Program,
    current: Option<usize>,
    is_focused: bool,
    follow: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Program ({} instructions) ", program.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if program.is_empty() {
        let paragraph = Paragraph::new("(empty program)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let width = area.width.saturating_sub(2).max(1) as usize;
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let total_rows = program.len().div_ceil(width);

    if follow {
        // Past the end highlights nothing but keeps the last row in view
        let row = current.unwrap_or(program.len()).min(program.len() - 1) / width;
        if row < *scroll_offset {
            *scroll_offset = row;
        } else if row >= *scroll_offset + visible_height {
            *scroll_offset = row + 1 - visible_height;
        }
    }
    *scroll_offset = (*scroll_offset).min(total_rows.saturating_sub(visible_height));

    let lines: Vec<Line> = program
        .instructions()
        .chunks(width)
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(row, chunk)| {
            let spans: Vec<Span> = chunk
                .iter()
                .enumerate()
                .map(|(col, &instruction)| {
                    let index = row * width + col;
                    let style = if Some(index) == current {
                        Style::default()
                            .bg(DEFAULT_THEME.secondary)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        instruction_style(instruction)
                    };
                    Span::styled(instruction.as_char().to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
