use dockmark_core::{Category, PanelAdapter};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::{AppMode, AppState};

use super::progress::spinner;
use super::theme::Theme;

/// Header widget showing title, resource counts, and selection status
pub struct Header<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        // Title
        let title = "DOCKMARK";
        let title_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        buf.set_string(area.x + 1, area.y, title, title_style);

        buf.set_string(
            area.x + 10,
            area.y,
            "─",
            Style::default().fg(self.theme.border),
        );

        let counts = Category::ALL
            .iter()
            .map(|c| format!("{} {}s", self.state.panel(*c).all_items().len(), c.label()))
            .collect::<Vec<_>>()
            .join("  ");
        buf.set_string(
            area.x + 12,
            area.y,
            &counts,
            Style::default().fg(self.theme.fg),
        );

        // Status (right-aligned)
        let selected = self.state.selection.total_count();
        let (status, status_style) = if self.state.mode == AppMode::Deleting {
            let suffix = if self.state.quit_after_batch {
                " (quitting when done)"
            } else {
                ""
            };
            (
                format!("{} Removing...{}", spinner(self.state.spinner_frame), suffix),
                Style::default().fg(self.theme.yellow),
            )
        } else if selected > 0 {
            (
                format!("{} selected", selected),
                Style::default()
                    .fg(self.theme.green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                "nothing selected".to_string(),
                Style::default().fg(self.theme.fg_dim),
            )
        };

        let status_x = area.x + area.width.saturating_sub(status.chars().count() as u16 + 2);
        buf.set_string(status_x, area.y, &status, status_style);
    }
}
