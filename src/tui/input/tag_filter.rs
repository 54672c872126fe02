use crossterm::event::{KeyCode, KeyEvent};

use super::Action;
use super::common::is_ctrl;

pub(super) fn map_tag_filter(key: KeyEvent) -> Option<Action> {
    if is_ctrl(&key, 'c') {
        return Some(Action::Cancel);
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveCursor(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveCursor(-1)),
        KeyCode::Char(' ') => Some(Action::ToggleMark),
        _ => None,
    }
}
