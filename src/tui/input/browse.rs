use crossterm::event::{KeyCode, KeyEvent};

use super::Action;
use super::common::is_ctrl;

pub(super) fn map_browse(key: KeyEvent) -> Option<Action> {
    if is_ctrl(&key, 'c') {
        return Some(Action::Quit);
    }
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Enter => Action::Open,
        KeyCode::Char('n') => Action::New,
        KeyCode::Char('e') => Action::Edit,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('t') => Action::StartTagFilter,
        KeyCode::Char(' ') => Action::ToggleComplete,
        KeyCode::Char('x') => Action::ToggleMark,
        KeyCode::Char('D') => Action::Delete,
        KeyCode::Char('p') => Action::CyclePriority,
        KeyCode::Tab => Action::ToggleScope,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveCursor(1),
        KeyCode::Char('k') | KeyCode::Up => Action::MoveCursor(-1),
        KeyCode::Char('g') | KeyCode::Home => Action::JumpFirst,
        KeyCode::Char('G') | KeyCode::End => Action::JumpLast,
        KeyCode::Char('s') => Action::CycleSort,
        KeyCode::Char('o') => Action::FlipOrder,
        _ => return None,
    };
    Some(action)
}
