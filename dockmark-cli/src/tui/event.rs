//! Terminal event polling. Panels are keyboard-driven, so mouse events are
//! folded into ticks and only key presses (not releases or repeats) count.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// Terminal key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for animations and batch polling
    Tick,
}

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> color_eyre::Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            Ok(classify(event::read()?))
        } else {
            Ok(AppEvent::Tick)
        }
    }
}

fn classify(event: CrosstermEvent) -> AppEvent {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
        CrosstermEvent::Resize(w, h) => AppEvent::Resize(w, h),
        _ => AppEvent::Tick,
    }
}
