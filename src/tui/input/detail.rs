use crossterm::event::{KeyCode, KeyEvent};

use super::Action;
use super::common::is_ctrl;

pub(super) fn map_detail(key: KeyEvent) -> Option<Action> {
    if is_ctrl(&key, 'c') {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('e') => Some(Action::Edit),
        KeyCode::Char(' ') => Some(Action::ToggleComplete),
        _ => None,
    }
}
