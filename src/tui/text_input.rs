use crate::util::unicode::{display_width, next_grapheme_boundary, prev_grapheme_boundary};

/// A single-line text buffer with a grapheme-aware cursor and a character cap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Byte offset into `value`, always on a grapheme boundary
    cursor: usize,
    limit: usize,
}

/// One editing keystroke applied to a [`TextInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Clear everything before the cursor (Ctrl+U)
    KillToStart,
}

impl TextInput {
    pub fn new(limit: usize) -> Self {
        TextInput {
            value: String::new(),
            cursor: 0,
            limit,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in terminal cells from the start of the text
    pub fn cursor_col(&self) -> usize {
        display_width(&self.value[..self.cursor])
    }

    /// Replace the contents, clipped to the limit, with the cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.value = text.chars().take(self.limit).collect();
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn apply(&mut self, edit: TextEdit) {
        match edit {
            TextEdit::Insert(c) => {
                if c.is_control() || self.value.chars().count() >= self.limit {
                    return;
                }
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            TextEdit::Backspace => {
                if let Some(prev) = prev_grapheme_boundary(&self.value, self.cursor) {
                    self.value.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                }
            }
            TextEdit::Delete => {
                if let Some(next) = next_grapheme_boundary(&self.value, self.cursor) {
                    self.value.replace_range(self.cursor..next, "");
                }
            }
            TextEdit::Left => {
                if let Some(prev) = prev_grapheme_boundary(&self.value, self.cursor) {
                    self.cursor = prev;
                }
            }
            TextEdit::Right => {
                if let Some(next) = next_grapheme_boundary(&self.value, self.cursor) {
                    self.cursor = next;
                }
            }
            TextEdit::Home => self.cursor = 0,
            TextEdit::End => self.cursor = self.value.len(),
            TextEdit::KillToStart => {
                self.value.replace_range(..self.cursor, "");
                self.cursor = 0;
            }
        }
    }
}
