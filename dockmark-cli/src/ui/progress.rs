use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use crate::app::BatchProgress;

use super::layout::centered_box;
use super::theme::Theme;

/// Braille spinner characters
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn spinner(frame: usize) -> char {
    SPINNER[frame % SPINNER.len()]
}

/// Cell counts of the batch bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BarCells {
    removed: usize,
    failed: usize,
    pending: usize,
}

/// Split `width` cells between processed-ok, failed and pending items.
///
/// A failure always gets at least one cell so it stays visible on long batches.
fn bar_cells(completed: usize, failed: usize, total: usize, width: usize) -> BarCells {
    if total == 0 || width == 0 {
        return BarCells {
            removed: 0,
            failed: 0,
            pending: width,
        };
    }

    let completed = completed.min(total);
    let failed = failed.min(completed);
    let done = completed * width / total;
    let mut failed_cells = failed * width / total;
    if failed > 0 {
        failed_cells = failed_cells.max(1).min(done.max(1));
    }
    let done = done.max(failed_cells);

    BarCells {
        removed: done - failed_cells,
        failed: failed_cells,
        pending: width - done,
    }
}

/// Busy overlay shown while a batch runs
pub struct BatchProgressView<'a> {
    progress: &'a BatchProgress,
    spinner_frame: usize,
    theme: &'a Theme,
}

impl<'a> BatchProgressView<'a> {
    pub fn new(progress: &'a BatchProgress, spinner_frame: usize, theme: &'a Theme) -> Self {
        Self {
            progress,
            spinner_frame,
            theme,
        }
    }
}

impl Widget for BatchProgressView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = centered_box(50, 10, area);

        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Removing... ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.yellow))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        if inner.height < 2 {
            return;
        }

        let text_style = Style::default().fg(self.theme.fg);
        let spinner_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);

        let mut row = inner.y;

        // Progress count
        buf.set_string(
            inner.x,
            row,
            spinner(self.spinner_frame).to_string(),
            spinner_style,
        );
        let count_str = format!(
            "{} / {} processed",
            self.progress.completed, self.progress.total
        );
        buf.set_string(inner.x + 2, row, &count_str, text_style);
        row += 1;

        // Progress bar: green for processed items, red for failures
        let cells = bar_cells(
            self.progress.completed,
            self.progress.failed,
            self.progress.total,
            (inner.width as usize).saturating_sub(2),
        );
        let mut x = inner.x;
        for (count, glyph, color) in [
            (cells.removed, "█", self.theme.green),
            (cells.failed, "█", self.theme.red),
            (cells.pending, "░", self.theme.border),
        ] {
            buf.set_string(x, row, glyph.repeat(count), Style::default().fg(color));
            x += count as u16;
        }
        row += 2;

        if row < inner.y + inner.height {
            let removed = format!("Removed: {}", self.progress.removed);
            buf.set_string(inner.x, row, &removed, text_style);
            row += 1;
        }

        if self.progress.failed > 0 && row < inner.y + inner.height {
            let fail_str = format!("{} failed", self.progress.failed);
            buf.set_string(
                inner.x,
                row,
                &fail_str,
                Style::default()
                    .fg(self.theme.red)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_cells_fill_width() {
        let cells = bar_cells(5, 0, 10, 20);
        assert_eq!(
            cells,
            BarCells {
                removed: 10,
                failed: 0,
                pending: 10
            }
        );
    }

    #[test]
    fn test_single_failure_stays_visible() {
        let cells = bar_cells(1, 1, 500, 20);
        assert_eq!(cells.failed, 1);
        assert_eq!(cells.removed + cells.failed + cells.pending, 20);
    }

    #[test]
    fn test_empty_batch_is_all_pending() {
        assert_eq!(bar_cells(0, 0, 0, 8).pending, 8);
        assert_eq!(bar_cells(3, 1, 3, 0).pending, 0);
    }

    #[test]
    fn test_finished_batch_has_no_pending() {
        let cells = bar_cells(3, 1, 3, 9);
        assert_eq!(cells.pending, 0);
        assert_eq!(cells.failed, 3);
        assert_eq!(cells.removed, 6);
    }

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner(0), spinner(SPINNER.len()));
        assert_ne!(spinner(0), spinner(1));
    }
}
