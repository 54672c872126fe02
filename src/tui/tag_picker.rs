use std::collections::BTreeSet;

/// Checklist of known tags. Row 0 is the synthetic "All tags" row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPicker {
    /// `None` until the distinct tag set has loaded
    pub tags: Option<Vec<String>>,
    pub cursor: usize,
    /// Tentative selection, committed only on confirm
    pub chosen: BTreeSet<String>,
}

impl TagPicker {
    /// Start from the tags currently applied to the listing.
    pub fn seeded(current: &[String]) -> Self {
        TagPicker {
            tags: None,
            cursor: 0,
            chosen: current.iter().cloned().collect(),
        }
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = Some(tags);
        self.cursor = self.cursor.min(self.row_count() - 1);
    }

    /// Rows including "All tags"
    pub fn row_count(&self) -> usize {
        self.tags.as_ref().map_or(0, Vec::len) + 1
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let rows = self.row_count() as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(rows) as usize;
    }

    /// Toggle the row under the cursor. "All tags" clears the selection.
    pub fn toggle(&mut self) {
        if self.cursor == 0 {
            self.chosen.clear();
            return;
        }
        let Some(tag) = self.tags.as_ref().and_then(|t| t.get(self.cursor - 1)) else {
            return;
        };
        if !self.chosen.remove(tag) {
            self.chosen.insert(tag.clone());
        }
    }

    pub fn all_selected(&self) -> bool {
        self.chosen.is_empty()
    }

    pub fn is_chosen(&self, tag: &str) -> bool {
        self.chosen.contains(tag)
    }

    /// The tentative selection in stable (sorted) order
    pub fn selection(&self) -> Vec<String> {
        self.chosen.iter().cloned().collect()
    }
}
