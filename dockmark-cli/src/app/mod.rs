mod action;
mod panel;
mod state;

pub use action::Action;
pub use panel::ResourcePanel;
pub use state::{AppMode, AppState, BatchProgress, SessionStats};
