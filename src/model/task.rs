use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::util::time::{start_of_day, start_of_day_after};

/// Identifier assigned by the store. Zero means "not yet persisted".
pub type TaskId = i64;

/// Highest (least urgent) priority value. Zero means unset.
pub const MAX_PRIORITY: u8 = 5;

/// A single trackable to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Tags in canonical `#tag` form
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, rename = "due_date", skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "epoch")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    /// 1 (most urgent) to 5 (least), 0 = unset
    #[serde(default, skip_serializing_if = "is_zero")]
    pub priority: u8,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

fn is_zero(p: &u8) -> bool {
    *p == 0
}

impl Task {
    /// A fresh, unpersisted task. Identifier and timestamps are assigned by the store.
    pub fn new(title: impl Into<String>) -> Self {
        Task {
            id: 0,
            title: title.into(),
            description: String::new(),
            tags: Vec::new(),
            due: None,
            created_at: epoch(),
            updated_at: epoch(),
            completed_at: None,
            completed: false,
            priority: 0,
        }
    }

    /// Set the completion flag, stamping or clearing `completed_at` on transitions.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        if completed == self.completed {
            return;
        }
        self.completed = completed;
        self.completed_at = if completed { Some(now) } else { None };
    }

    pub fn toggle_completed(&mut self, now: DateTime<Utc>) {
        self.set_completed(!self.completed, now);
    }

    /// Advance priority 1 → 2 → … → 5 → 1. Unset becomes 1.
    pub fn cycle_priority(&mut self) {
        self.priority = (self.priority % MAX_PRIORITY) + 1;
    }

    /// Repair records that did not come from the store (imports).
    pub fn normalize(&mut self, now: DateTime<Utc>) {
        if self.priority > MAX_PRIORITY {
            self.priority = MAX_PRIORITY;
        }
        if self.completed && self.completed_at.is_none() {
            self.completed_at = Some(now);
        } else if !self.completed {
            self.completed_at = None;
        }
    }

    /// Past its due date and still open
    pub fn is_overdue(&self, now: DateTime<Local>) -> bool {
        !self.completed && self.due.is_some_and(|due| due < now.with_timezone(&Utc))
    }

    pub fn is_due_today(&self, now: DateTime<Local>) -> bool {
        let start = start_of_day(now.date_naive());
        self.due_within(start, start_of_day_after(start.date_naive()))
    }

    pub fn is_due_tomorrow(&self, now: DateTime<Local>) -> bool {
        let start = start_of_day_after(now.date_naive());
        self.due_within(start, start_of_day_after(start.date_naive()))
    }

    fn due_within(&self, start: DateTime<Local>, end: DateTime<Local>) -> bool {
        self.due.is_some_and(|due| {
            let due = due.with_timezone(&Local);
            due >= start && due < end
        })
    }

    /// Classify the due date for display. `None` when no due date is set.
    pub fn due_label(&self, now: DateTime<Local>) -> Option<DueLabel> {
        self.due?;
        Some(if self.is_overdue(now) {
            DueLabel::Overdue
        } else if self.is_due_today(now) {
            DueLabel::Today
        } else if self.is_due_tomorrow(now) {
            DueLabel::Tomorrow
        } else {
            DueLabel::Plain
        })
    }

    /// Human-readable priority name
    pub fn priority_label(&self) -> &'static str {
        match self.priority {
            1 => "Urgent",
            2 => "High",
            3 => "Medium",
            4 => "Low",
            5 => "Lowest",
            _ => "",
        }
    }
}

/// How a due date should be annotated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    Overdue,
    Today,
    Tomorrow,
    Plain,
}
