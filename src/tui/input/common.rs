use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::text_input::TextEdit;

/// Some terminals report Shift+d as `d` with SHIFT set. Fold that into `D`
/// so bindings can match on the uppercase char.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}

pub(super) fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Editing keys shared by the form fields and the search box
pub(super) fn text_edit(key: KeyEvent) -> Option<TextEdit> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('u') => Some(TextEdit::KillToStart),
            KeyCode::Char('a') => Some(TextEdit::Home),
            KeyCode::Char('e') => Some(TextEdit::End),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(c) => Some(TextEdit::Insert(c)),
        KeyCode::Backspace => Some(TextEdit::Backspace),
        KeyCode::Delete => Some(TextEdit::Delete),
        KeyCode::Left => Some(TextEdit::Left),
        KeyCode::Right => Some(TextEdit::Right),
        KeyCode::Home => Some(TextEdit::Home),
        KeyCode::End => Some(TextEdit::End),
        _ => None,
    }
}
