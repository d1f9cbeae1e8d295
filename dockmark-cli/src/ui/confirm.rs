use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use super::layout::{centered_box, dialog_height};
use super::theme::Theme;

/// Batch delete confirmation dialog widget
pub struct ConfirmView<'a> {
    title: &'a str,
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> ConfirmView<'a> {
    pub fn new(title: &'a str, message: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            message,
            theme,
        }
    }
}

impl Widget for ConfirmView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<&str> = self.message.lines().collect();
        // message + blank + hints, plus border and padding
        let height = dialog_height(lines.len(), 2 + 4);
        let dialog_area = centered_box(60, height, area);

        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.red))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        if inner.height < 1 || inner.width < 10 {
            return;
        }

        let text_style = Style::default().fg(self.theme.fg);
        let summary_style = Style::default()
            .fg(self.theme.yellow)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default()
            .fg(self.theme.green)
            .add_modifier(Modifier::BOLD);

        // The question comes first, the per-category summary last
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            if i as u16 >= inner.height.saturating_sub(1) {
                break;
            }
            let style = if i == last && i > 0 {
                summary_style
            } else {
                text_style
            };
            buf.set_stringn(inner.x, inner.y + i as u16, *line, inner.width as usize, style);
        }

        // Action hints
        let hints_y = inner.y + inner.height.saturating_sub(1);
        buf.set_string(inner.x, hints_y, "[y]", key_style);
        buf.set_string(inner.x + 4, hints_y, "Yes, remove", text_style);
        buf.set_string(inner.x + 18, hints_y, "[n]", key_style);
        buf.set_string(inner.x + 22, hints_y, "Cancel", text_style);
    }
}
