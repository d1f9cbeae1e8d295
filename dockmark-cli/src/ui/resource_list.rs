use dockmark_core::{Category, Item, PanelAdapter, Resource, SelectionStore};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::app::ResourcePanel;

use super::theme::Theme;

/// One category's list with selection markers
pub struct ResourceListView<'a> {
    panel: &'a ResourcePanel,
    selection: &'a SelectionStore,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResourceListView<'a> {
    pub fn new(
        panel: &'a ResourcePanel,
        selection: &'a SelectionStore,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            panel,
            selection,
            focused,
            theme,
        }
    }
}

/// Rows available inside a panel's border
pub fn list_height(area: Rect) -> usize {
    area.height.saturating_sub(2) as usize
}

/// Panel title: `Containers (2/5)`
pub fn panel_title(category: Category, selected: usize, total: usize) -> String {
    format!(" {} ({}/{}) ", category.title(), selected, total)
}

/// Truncate to `width` chars, marking the cut with an ellipsis
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Label and detail columns `(text, width)` for a row
fn columns(resource: &Resource) -> (String, Vec<(String, usize)>) {
    match resource {
        Resource::Container(c) => (
            c.names.clone(),
            vec![(c.image.clone(), 20), (c.status.clone(), 18)],
        ),
        Resource::Image(i) => {
            let label = if i.tag.is_empty() || i.tag == "<none>" {
                i.repository.clone()
            } else {
                format!("{}:{}", i.repository, i.tag)
            };
            let short_id = i.id.trim_start_matches("sha256:").chars().take(12).collect();
            (label, vec![(short_id, 12), (i.size.clone(), 9)])
        }
        Resource::Volume(v) => (v.name.clone(), vec![(v.driver.clone(), 10)]),
        Resource::Network(n) => (
            n.name.clone(),
            vec![(n.driver.clone(), 10), (n.scope.clone(), 6)],
        ),
    }
}

impl Widget for ResourceListView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let category = self.panel.category();
        let total = self.panel.all_items().len();

        let border_color = if self.focused {
            self.theme.blue
        } else {
            self.theme.border
        };
        let title_style = if self.focused {
            Style::default()
                .fg(self.theme.blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.fg_dim)
        };

        let mut block = Block::default()
            .title(panel_title(category, self.selection.count(category), total))
            .title_style(title_style)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        if !self.panel.filter().is_empty() {
            block = block.title_bottom(format!(" /{} ", self.panel.filter()));
        }

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 1 || inner.width < 12 {
            return;
        }

        let items = self.panel.visible_items();
        if items.is_empty() {
            let msg = if total == 0 {
                format!("No {}s", category.label())
            } else {
                "No matches".to_string()
            };
            let x = inner.x + inner.width.saturating_sub(msg.len() as u16) / 2;
            let y = inner.y + inner.height / 2;
            buf.set_string(x, y, &msg, Style::default().fg(self.theme.fg_dim));
            return;
        }

        let scroll_offset = self.panel.scroll_offset();
        for (i, resource) in items
            .iter()
            .skip(scroll_offset)
            .take(inner.height as usize)
            .enumerate()
        {
            let y = inner.y + i as u16;
            let is_cursor = self.focused && i + scroll_offset == self.panel.selected_index();
            let is_marked = self
                .selection
                .is_selected(category, &resource.id().into());

            let row_style = if is_cursor {
                Style::default()
                    .bg(self.theme.selection_bg)
                    .fg(self.theme.selection_fg)
            } else if is_marked {
                Style::default()
                    .bg(self.theme.bg_highlight)
                    .fg(self.theme.fg)
            } else {
                Style::default().fg(self.theme.fg)
            };
            // Foreground only, on the row's background
            let cell = |fg: Color| {
                if is_cursor {
                    row_style
                } else {
                    row_style.fg(fg)
                }
            };

            // Clear the row
            buf.set_string(inner.x, y, " ".repeat(inner.width as usize), row_style);

            let mut x = inner.x;

            // Selection marker
            let (marker, marker_color) = if is_marked {
                ("[x] ", self.theme.green)
            } else {
                ("[ ] ", self.theme.fg_muted)
            };
            buf.set_string(x, y, marker, cell(marker_color));
            x += 4;

            let (label, details) = columns(resource);

            // Details are right-aligned and dropped when the panel is narrow
            let mut detail_width: usize = details.iter().map(|(_, w)| w + 1).sum();
            let mut details = details;
            while detail_width + 12 > (inner.width as usize).saturating_sub(4) {
                let Some((_, w)) = details.pop() else {
                    break;
                };
                detail_width -= w + 1;
            }

            let label_width = (inner.width as usize).saturating_sub(4 + detail_width);
            buf.set_string(x, y, fit(&label, label_width), cell(self.theme.fg));

            let mut dx = inner.x + inner.width - detail_width as u16;
            for (idx, (text, width)) in details.iter().enumerate() {
                let color = match resource {
                    Resource::Container(c) if idx == 1 => self.theme.state_color(&c.state),
                    _ => self.theme.fg_dim,
                };
                buf.set_string(dx, y, fit(text, *width), cell(color));
                dx += *width as u16 + 1;
            }
        }
    }
}
