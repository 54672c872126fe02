mod browse;
mod common;
mod detail;
mod form;
mod search;
mod tag_filter;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};
use super::effect::Effect;
use super::text_input::TextEdit;

use common::normalize_key;

/// A keystroke translated for the active view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the session (Browsing, Detail)
    Quit,
    /// Detail back to the list
    Back,
    /// Leave a form or entry view without committing
    Cancel,
    MoveCursor(isize),
    JumpFirst,
    JumpLast,
    Open,
    New,
    Edit,
    StartSearch,
    StartTagFilter,
    ToggleComplete,
    /// Mark in the list, check/uncheck in the tag picker
    ToggleMark,
    Delete,
    CyclePriority,
    /// Pending only vs everything
    ToggleScope,
    CycleSort,
    FlipOrder,
    FocusNext,
    FocusPrev,
    /// Enter: confirm, or next field in a form
    Submit,
    /// Save the form from any field
    Save,
    Text(TextEdit),
}

/// Translate a key for `mode`. `None` means the key does nothing there.
pub fn map_key(mode: &Mode, key: KeyEvent) -> Option<Action> {
    match mode {
        Mode::Browsing => browse::map_browse(key),
        Mode::Detail(_) => detail::map_detail(key),
        Mode::Form(_) => form::map_form(key),
        Mode::Search(_) => search::map_search(key),
        Mode::TagFilter(_) => tag_filter::map_tag_filter(key),
    }
}

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Effect> {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return None;
    }
    app.error = None;

    let key = normalize_key(key);
    let action = map_key(&app.mode, key)?;
    app.update(action)
}
