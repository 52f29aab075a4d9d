use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Focus, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    PageDown,
    PageUp,
    /// Move the selected product one slot earlier / later
    ShiftUp,
    ShiftDown,
    /// Move the selected product to the start of the previous / next page
    ShiftPrevPage,
    ShiftNextPage,
    SaveOrder,
    Select,
    Back,
    NextImage,
    PrevImage,
    HeroNext,
    HeroPrev,
    Delete,
    Refresh,
    Help,
    ExitMode,
    Confirm,
    Cancel,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match &app.mode {
        Mode::DeleteConfirm(_) => return handle_confirm_mode(key),
        // Any key closes help
        Mode::Help => return Action::ExitMode,
        Mode::Normal => {}
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('?'), _) => Action::Help,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Refresh,
        (KeyCode::Char('['), KeyModifiers::NONE) => Action::HeroPrev,
        (KeyCode::Char(']'), KeyModifiers::NONE) => Action::HeroNext,
        _ => match app.focus {
            Focus::Dashboard => handle_dashboard(key),
            Focus::ProductDetail => handle_detail(key),
        },
    }
}

fn handle_dashboard(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, KeyModifiers::NONE) => {
            Action::MoveDown
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, KeyModifiers::NONE) => {
            Action::MoveUp
        }
        (KeyCode::Char('J'), _) | (KeyCode::Down, KeyModifiers::SHIFT) => Action::ShiftDown,
        (KeyCode::Char('K'), _) | (KeyCode::Up, KeyModifiers::SHIFT) => Action::ShiftUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => Action::PageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::Char('<'), _) => Action::ShiftPrevPage,
        (KeyCode::Char('>'), _) => Action::ShiftNextPage,
        (KeyCode::Char('w'), KeyModifiers::NONE) => Action::SaveOrder,
        (KeyCode::Char('d'), KeyModifiers::NONE) => Action::Delete,
        (KeyCode::Enter, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => Action::Select,
        _ => Action::None,
    }
}

fn handle_detail(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Backspace, _) => Action::Back,
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) | (KeyCode::Tab, _) => {
            Action::NextImage
        }
        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) | (KeyCode::BackTab, _) => {
            Action::PrevImage
        }
        _ => Action::None,
    }
}

fn handle_confirm_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avastore_core::AppConfig;
    use std::sync::Arc;

    use crate::theme::Theme;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), Theme::default())
    }

    #[test]
    fn test_dashboard_keys() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE), &app), Action::MoveDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('K'), KeyModifiers::SHIFT), &app), Action::ShiftUp);
        assert_eq!(handle_key_event(key(KeyCode::Char('>'), KeyModifiers::SHIFT), &app), Action::ShiftNextPage);
        assert_eq!(handle_key_event(key(KeyCode::Enter, KeyModifiers::NONE), &app), Action::Select);
        assert_eq!(handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL), &app), Action::Quit);
    }

    #[test]
    fn test_detail_keys() {
        let mut app = app();
        app.focus = Focus::ProductDetail;
        assert_eq!(handle_key_event(key(KeyCode::Char('l'), KeyModifiers::NONE), &app), Action::NextImage);
        assert_eq!(handle_key_event(key(KeyCode::Left, KeyModifiers::NONE), &app), Action::PrevImage);
        assert_eq!(handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE), &app), Action::Back);
        assert_eq!(handle_key_event(key(KeyCode::Char('d'), KeyModifiers::NONE), &app), Action::None);
    }

    #[test]
    fn test_modes() {
        let mut app = app();
        app.mode = Mode::DeleteConfirm(3);
        assert_eq!(handle_key_event(key(KeyCode::Char('y'), KeyModifiers::NONE), &app), Action::Confirm);
        assert_eq!(handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE), &app), Action::Cancel);
        assert_eq!(handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE), &app), Action::None);

        app.mode = Mode::Help;
        assert_eq!(handle_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE), &app), Action::ExitMode);
    }
}
