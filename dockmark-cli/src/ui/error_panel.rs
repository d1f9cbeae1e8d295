use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use super::layout::{centered_box, dialog_height};
use super::theme::Theme;

/// Error panel listing one failure per line
pub struct ErrorView<'a> {
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> ErrorView<'a> {
    pub fn new(message: &'a str, theme: &'a Theme) -> Self {
        Self { message, theme }
    }
}

impl Widget for ErrorView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<&str> = self.message.lines().collect();
        let height = dialog_height(lines.len(), 2 + 4);
        let dialog_area = centered_box(72, height, area);

        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Error ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.red))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        if inner.height < 1 {
            return;
        }

        let text_style = Style::default().fg(self.theme.fg);
        let key_style = Style::default()
            .fg(self.theme.green)
            .add_modifier(Modifier::BOLD);

        let room = inner.height.saturating_sub(2) as usize;
        for (i, line) in lines.iter().take(room).enumerate() {
            buf.set_stringn(inner.x, inner.y + i as u16, *line, inner.width as usize, text_style);
        }
        if lines.len() > room && room > 0 {
            let more = format!("...and {} more (see log)", lines.len() - room + 1);
            buf.set_string(
                inner.x,
                inner.y + room as u16 - 1,
                " ".repeat(inner.width as usize),
                text_style,
            );
            buf.set_string(
                inner.x,
                inner.y + room as u16 - 1,
                &more,
                Style::default().fg(self.theme.fg_dim),
            );
        }

        let hints_y = inner.y + inner.height.saturating_sub(1);
        buf.set_string(inner.x, hints_y, "[Esc]", key_style);
        buf.set_string(inner.x + 6, hints_y, "Dismiss", text_style);
    }
}
