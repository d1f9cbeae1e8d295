use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main application layout: header, a 2x2 grid of panels, footer
pub struct AppLayout {
    pub header: Rect,
    /// One rect per category, in removal order
    pub panels: [Rect; 4],
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(6),    // Panels
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let halves = |row: Rect| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(row)
        };
        let top = halves(rows[0]);
        let bottom = halves(rows[1]);

        Self {
            header: chunks[0],
            panels: [top[0], top[1], bottom[0], bottom[1]],
            footer: chunks[2],
        }
    }
}

/// Centered box of a fixed size, shrunk to fit the area
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;

    Rect::new(x, y, width, height)
}

/// Height of a dialog showing `lines` of text plus `chrome` rows of border, padding and hints
pub fn dialog_height(lines: usize, chrome: u16) -> u16 {
    u16::try_from(lines)
        .unwrap_or(u16::MAX)
        .saturating_add(chrome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panels_tile_the_middle() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 42));
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.footer.y, 41);
        let width: u16 = layout.panels[..2].iter().map(|r| r.width).sum();
        assert_eq!(width, 100);
        assert_eq!(layout.panels[2].y, layout.panels[0].y + layout.panels[0].height);
    }

    #[test]
    fn test_centered_box_fits_small_area() {
        let rect = centered_box(60, 20, Rect::new(0, 0, 30, 10));
        assert_eq!(rect, Rect::new(2, 2, 26, 6));
    }

    #[test]
    fn test_dialog_height_saturates() {
        assert_eq!(dialog_height(3, 6), 9);
        assert_eq!(dialog_height(70_000, 6), u16::MAX);
        assert_eq!(dialog_height(u16::MAX as usize - 2, 6), u16::MAX);
    }
}
