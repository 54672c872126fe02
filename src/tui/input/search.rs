use crossterm::event::{KeyCode, KeyEvent};

use super::Action;
use super::common::{is_ctrl, text_edit};

pub(super) fn map_search(key: KeyEvent) -> Option<Action> {
    if is_ctrl(&key, 'c') {
        return Some(Action::Cancel);
    }
    match key.code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::Submit),
        _ => text_edit(key).map(Action::Text),
    }
}
