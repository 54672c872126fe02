use std::collections::BTreeSet;

use crate::model::{Task, TaskId};

/// Cursor over the displayed list plus the set of explicitly marked tasks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub cursor: usize,
    /// Marked task ids, independent of the cursor
    pub marked: BTreeSet<TaskId>,
}

impl Selection {
    /// Move by `delta` rows, wrapping at both ends.
    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let len = len as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }

    pub fn jump_first(&mut self) {
        self.cursor = 0;
    }

    pub fn jump_last(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
    }

    /// Add `id` to the marked set, or remove it if already there.
    pub fn toggle_mark(&mut self, id: TaskId) {
        if !self.marked.remove(&id) {
            self.marked.insert(id);
        }
    }

    pub fn is_marked(&self, id: TaskId) -> bool {
        self.marked.contains(&id)
    }

    /// Re-apply bounds after the list was replaced.
    pub fn clamp(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    /// Ids a bulk action applies to: the marked set, else the cursor task.
    pub fn targets(&self, tasks: &[Task]) -> Vec<TaskId> {
        if !self.marked.is_empty() {
            return self.marked.iter().copied().collect();
        }
        tasks.get(self.cursor).map(|t| vec![t.id]).unwrap_or_default()
    }

    pub fn unmark_all(&mut self, ids: &[TaskId]) {
        for id in ids {
            self.marked.remove(id);
        }
    }
}
