use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Action, AppMode};

/// Map key events to actions based on current mode
pub fn handle_key(key: KeyEvent, mode: AppMode) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match mode {
        AppMode::Help => handle_key_help(key),
        AppMode::Filtering => handle_key_filtering(key),
        AppMode::ConfirmDelete => handle_key_confirm(key),
        AppMode::Deleting => handle_key_deleting(key),
        AppMode::ShowError => handle_key_error(key),
        AppMode::Browsing => handle_key_browsing(key),
    }
}

fn handle_key_help(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::HideHelp,
        _ => Action::Tick,
    }
}

fn handle_key_filtering(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ApplyFilter,
        KeyCode::Esc => Action::ClearFilter,
        KeyCode::Backspace => Action::FilterBackspace,
        KeyCode::Char(c) => Action::FilterInput(c),
        _ => Action::Tick,
    }
}

fn handle_key_confirm(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::ConfirmDelete,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::CancelDelete,
        _ => Action::Tick,
    }
}

/// Quitting waits for the running batch
fn handle_key_deleting(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        _ => Action::Tick,
    }
}

fn handle_key_error(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Action::DismissError,
        _ => Action::Tick,
    }
}

fn handle_key_browsing(key: KeyEvent) -> Action {
    match key.code {
        // Quit
        KeyCode::Char('q') => Action::Quit,

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home | KeyCode::Char('g') => Action::GoToFirst,
        KeyCode::End | KeyCode::Char('G') => Action::GoToLast,
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Action::NextPanel,
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Action::PrevPanel,

        // Selection
        KeyCode::Char(' ') => Action::ToggleSelect,
        KeyCode::Char('a') => Action::SelectAll,
        KeyCode::Char('A') => Action::DeselectAll,
        KeyCode::Char('C') => Action::ClearSelection,

        // Delete
        KeyCode::Char('D') | KeyCode::Delete => Action::DeleteSelected,

        // Filter
        KeyCode::Char('/') => Action::StartFilter,
        KeyCode::Esc => Action::ClearFilter,

        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('?') => Action::ShowHelp,

        _ => Action::Tick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_quits_in_every_mode() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [
            AppMode::Browsing,
            AppMode::Filtering,
            AppMode::Help,
            AppMode::ConfirmDelete,
            AppMode::Deleting,
            AppMode::ShowError,
        ] {
            assert_eq!(handle_key(ctrl_c, mode), Action::Quit);
        }
    }

    #[test]
    fn test_browsing_selection_keys() {
        assert_eq!(handle_key(key(KeyCode::Char(' ')), AppMode::Browsing), Action::ToggleSelect);
        assert_eq!(handle_key(key(KeyCode::Char('a')), AppMode::Browsing), Action::SelectAll);
        assert_eq!(handle_key(key(KeyCode::Char('A')), AppMode::Browsing), Action::DeselectAll);
        assert_eq!(handle_key(key(KeyCode::Char('D')), AppMode::Browsing), Action::DeleteSelected);
        assert_eq!(handle_key(key(KeyCode::BackTab), AppMode::Browsing), Action::PrevPanel);
    }

    #[test]
    fn test_filter_mode_captures_letters() {
        assert_eq!(handle_key(key(KeyCode::Char('q')), AppMode::Filtering), Action::FilterInput('q'));
        assert_eq!(handle_key(key(KeyCode::Enter), AppMode::Filtering), Action::ApplyFilter);
    }

    #[test]
    fn test_confirm_keys() {
        assert_eq!(handle_key(key(KeyCode::Char('y')), AppMode::ConfirmDelete), Action::ConfirmDelete);
        assert_eq!(handle_key(key(KeyCode::Esc), AppMode::ConfirmDelete), Action::CancelDelete);
        assert_eq!(handle_key(key(KeyCode::Char('x')), AppMode::ConfirmDelete), Action::Tick);
    }

    #[test]
    fn test_deleting_ignores_selection_keys() {
        assert_eq!(handle_key(key(KeyCode::Char(' ')), AppMode::Deleting), Action::Tick);
        assert_eq!(handle_key(key(KeyCode::Char('D')), AppMode::Deleting), Action::Tick);
        assert_eq!(handle_key(key(KeyCode::Char('q')), AppMode::Deleting), Action::Quit);
    }
}
