use std::cmp::Ordering;

use chrono::{DateTime, Days, Local, Utc};

use crate::model::{DueFilter, Query, SortKey, SortOrder, Task};
use crate::util::time::{start_of_day, start_of_day_after};

/// Filter and order `tasks` according to `query`, relative to `now`.
///
/// Input order is treated as insertion order: ties keep it regardless of
/// direction.
pub fn apply(query: &Query, tasks: impl IntoIterator<Item = Task>, now: DateTime<Local>) -> Vec<Task> {
    let window = query.due.map(|due| DueWindow::resolve(due, now));
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<Task> = tasks
        .into_iter()
        .filter(|task| query.completed.is_none_or(|c| task.completed == c))
        .filter(|task| query.tags.iter().all(|tag| task.tags.contains(tag)))
        .filter(|task| needle.as_deref().is_none_or(|n| matches_text(task, n)))
        .filter(|task| window.as_ref().is_none_or(|w| w.contains(task)))
        .collect();

    sort_tasks(&mut matched, query.sort, query.order);
    matched
}

fn matches_text(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle) || task.description.to_lowercase().contains(needle)
}

/// Stable sort. Unset priority (0) always sorts after 1-5, in either direction.
pub fn sort_tasks(tasks: &mut [Task], key: SortKey, order: SortOrder) {
    let directed = |ord: Ordering| match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    };
    tasks.sort_by(|a, b| match key {
        SortKey::Created => directed(a.created_at.cmp(&b.created_at)),
        SortKey::Updated => directed(a.updated_at.cmp(&b.updated_at)),
        SortKey::Due => directed(a.due.cmp(&b.due)),
        SortKey::Title => directed(a.title.cmp(&b.title)),
        SortKey::Priority => (a.priority == 0)
            .cmp(&(b.priority == 0))
            .then_with(|| directed(a.priority.cmp(&b.priority))),
    });
}

/// Half-open instant range a due date must fall in, plus the overdue rule
enum DueWindow {
    Range {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    Overdue {
        before: DateTime<Utc>,
    },
}

impl DueWindow {
    fn resolve(filter: DueFilter, now: DateTime<Local>) -> DueWindow {
        let today = now.date_naive();
        let utc = |t: DateTime<Local>| t.with_timezone(&Utc);
        match filter {
            DueFilter::Today => DueWindow::Range {
                start: utc(start_of_day(today)),
                end: utc(start_of_day_after(today)),
            },
            DueFilter::Tomorrow => {
                let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
                DueWindow::Range {
                    start: utc(start_of_day(tomorrow)),
                    end: utc(start_of_day_after(tomorrow)),
                }
            }
            DueFilter::NextWeek => {
                let week_out = today.checked_add_days(Days::new(7)).unwrap_or(today);
                DueWindow::Range {
                    start: utc(start_of_day(today)),
                    end: utc(start_of_day(week_out)),
                }
            }
            DueFilter::Overdue => DueWindow::Overdue {
                before: utc(start_of_day(today)),
            },
            DueFilter::On(day) => DueWindow::Range {
                start: utc(start_of_day(day)),
                end: utc(start_of_day_after(day)),
            },
        }
    }

    fn contains(&self, task: &Task) -> bool {
        let Some(due) = task.due else {
            return false;
        };
        match self {
            DueWindow::Range { start, end } => due >= *start && due < *end,
            DueWindow::Overdue { before } => due < *before && !task.completed,
        }
    }
}
