use crossterm::event::{KeyCode, KeyEvent};

use super::Action;
use super::common::{is_ctrl, text_edit};

pub(super) fn map_form(key: KeyEvent) -> Option<Action> {
    if is_ctrl(&key, 'c') {
        return Some(Action::Cancel);
    }
    if is_ctrl(&key, 's') {
        return Some(Action::Save);
    }
    match key.code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Tab | KeyCode::Down => Some(Action::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(Action::FocusPrev),
        _ => text_edit(key).map(Action::Text),
    }
}
