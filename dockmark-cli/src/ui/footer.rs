use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::{AppMode, SessionStats};

use super::theme::Theme;

/// Footer widget showing keyboard hints and session stats
pub struct Footer<'a> {
    mode: AppMode,
    theme: &'a Theme,
    session_stats: &'a SessionStats,
}

impl<'a> Footer<'a> {
    pub fn new(mode: AppMode, theme: &'a Theme, session_stats: &'a SessionStats) -> Self {
        Self {
            mode,
            theme,
            session_stats,
        }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let hints: &[(&str, &str)] = match self.mode {
            AppMode::Browsing => &[
                ("Tab", "Panel"),
                ("↑↓", "Navigate"),
                ("Space", "Mark"),
                ("a/A", "All/None"),
                ("/", "Filter"),
                ("D", "Delete"),
                ("?", "Help"),
                ("q", "Quit"),
            ],
            AppMode::Filtering => &[("Enter", "Apply"), ("Esc", "Clear")],
            AppMode::Help => &[("Esc", "Close help"), ("q", "Close")],
            AppMode::ConfirmDelete => &[("y", "Yes"), ("n", "Cancel")],
            AppMode::Deleting => &[("q", "Quit when done")],
            AppMode::ShowError => &[("Esc", "Dismiss")],
        };

        let key_style = Style::default()
            .fg(self.theme.fg)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.theme.fg_dim);
        let sep_style = Style::default().fg(self.theme.border);

        let mut x = area.x + 1;
        for (i, (key, desc)) in hints.iter().enumerate() {
            // Key
            buf.set_string(x, area.y, *key, key_style);
            x += key.chars().count() as u16 + 1;

            // Description
            buf.set_string(x, area.y, *desc, desc_style);
            x += desc.len() as u16;

            // Separator
            if i < hints.len() - 1 {
                buf.set_string(x, area.y, "  │  ", sep_style);
                x += 5;
            }

            if x >= area.x + area.width - 5 {
                break;
            }
        }

        // Removal tally on the right side, once something happened
        let stats = &self.session_stats;
        if stats.items_removed + stats.items_failed > 0 {
            let mut text = format!("Removed: {}", stats.items_removed);
            if stats.items_failed > 0 {
                text.push_str(&format!("  Failed: {}", stats.items_failed));
            }
            let stats_style = Style::default()
                .fg(if stats.items_failed > 0 {
                    self.theme.yellow
                } else {
                    self.theme.green
                })
                .add_modifier(Modifier::BOLD);
            let stats_x = area.x + area.width.saturating_sub(text.len() as u16 + 1);
            if stats_x > x + 2 {
                buf.set_string(stats_x, area.y, &text, stats_style);
            }
        }
    }
}
