use chrono::{DateTime, Local};
use serde::Serialize;

use crate::model::{DueLabel, Task, TaskId};
use crate::util::time::{format_day, format_stamp};
use crate::util::unicode::{ellipsize, pad_to_width};

const TITLE_WIDTH: usize = 40;
const DUE_WIDTH: usize = 12;
const TAGS_WIDTH: usize = 10;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub total: usize,
    pub tasks: &'a [Task],
}

#[derive(Serialize)]
pub struct TaskDetailJson<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_label: Option<&'static str>,
    pub overdue: bool,
}

pub fn task_detail_json(task: &Task, now: DateTime<Local>) -> TaskDetailJson<'_> {
    TaskDetailJson {
        task,
        priority_label: (task.priority > 0).then(|| task.priority_label()),
        overdue: task.is_overdue(now),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Table used by `list`: header, rule, one row per task, then a total line.
pub fn format_task_table(tasks: &[Task], now: DateTime<Local>) -> Vec<String> {
    let mut lines = Vec::with_capacity(tasks.len() + 4);
    lines.push(table_row("ID", "P", "Title", "Due", "Tags", "Status"));
    lines.push("-".repeat(85));

    for task in tasks {
        let priority = if task.priority > 0 {
            task.priority.to_string()
        } else {
            " ".to_string()
        };
        let status = if task.completed { "[x]" } else { "[ ]" };
        lines.push(table_row(
            &task.id.to_string(),
            &priority,
            &ellipsize(&task.title, TITLE_WIDTH),
            &due_cell(task, now),
            &ellipsize(&task.tags.join(" "), TAGS_WIDTH),
            status,
        ));
    }

    lines.push(String::new());
    lines.push(format!("Total: {} todo(s)", tasks.len()));
    lines
}

fn table_row(id: &str, p: &str, title: &str, due: &str, tags: &str, status: &str) -> String {
    format!(
        "{} {} {} {} {} {}",
        pad_to_width(id, 4),
        pad_to_width(p, 1),
        pad_to_width(title, TITLE_WIDTH),
        pad_to_width(due, DUE_WIDTH),
        pad_to_width(tags, TAGS_WIDTH),
        status
    )
}

fn due_cell(task: &Task, now: DateTime<Local>) -> String {
    let Some(due) = task.due else {
        return String::new();
    };
    match task.due_label(now) {
        Some(DueLabel::Overdue) => format!("{}!", format_day(due)),
        Some(DueLabel::Today) => "today".into(),
        Some(DueLabel::Tomorrow) => "tomorrow".into(),
        _ => format_day(due),
    }
}

/// Multi-line detail block used by `show`
pub fn format_task_detail(task: &Task, now: DateTime<Local>) -> Vec<String> {
    let mut lines = vec![format!("Todo #{}", task.id), "=".repeat(40)];
    let mut field = |label: &str, value: String| {
        lines.push(format!("{:<13}{}", format!("{}:", label), value));
    };

    field("Title", task.title.clone());
    if !task.description.is_empty() {
        field("Description", task.description.clone());
    }
    let status = if task.completed { "Completed" } else { "Pending" };
    field("Status", status.into());
    if task.priority > 0 {
        field(
            "Priority",
            format!("{} ({})", task.priority, task.priority_label()),
        );
    }
    if !task.tags.is_empty() {
        field("Tags", task.tags.join(" "));
    }
    if let Some(due) = task.due {
        let suffix = match task.due_label(now) {
            Some(DueLabel::Overdue) => " (OVERDUE)",
            Some(DueLabel::Today) => " (today)",
            Some(DueLabel::Tomorrow) => " (tomorrow)",
            _ => "",
        };
        field("Due", format!("{}{}", format_stamp(due), suffix));
    }
    field("Created", format_stamp(task.created_at));
    field("Updated", format_stamp(task.updated_at));
    if let Some(done) = task.completed_at {
        field("Completed", format_stamp(done));
    }
    lines
}

/// One-line confirmation after a mutation, e.g. `Created todo #3: Buy milk`
pub fn action_line(verb: &str, id: TaskId, title: &str) -> String {
    format!("{} todo #{}: {}", verb, id, title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::time::{end_of_day, start_of_day};
    use chrono::{Days, TimeZone, Utc};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn task(id: TaskId, title: &str) -> Task {
        let mut t = Task::new(title);
        t.id = id;
        t.created_at = start_of_day(now().date_naive()).with_timezone(&Utc);
        t.updated_at = t.created_at;
        t
    }

    #[test]
    fn table_header_rows_and_total() {
        let mut a = task(1, "Buy milk");
        a.priority = 2;
        a.tags = vec!["#home".into()];
        let mut b = task(12, &"x".repeat(50));
        b.set_completed(true, Utc::now());

        let lines = format_task_table(&[a, b], now());
        assert!(lines[0].starts_with("ID   P Title"));
        assert!(lines[0].ends_with("Tags       Status"));
        assert_eq!(lines[1], "-".repeat(85));
        assert!(lines[2].starts_with("1    2 Buy milk"));
        assert!(lines[2].contains("#home"));
        assert!(lines[2].ends_with("[ ]"));
        assert!(lines[3].starts_with("12     "));
        assert!(lines[3].contains(&format!("{}...", "x".repeat(37))));
        assert!(lines[3].ends_with("[x]"));
        assert_eq!(lines.last().map(String::as_str), Some("Total: 2 todo(s)"));
    }

    #[test]
    fn due_cells_are_annotated() {
        let today = now().date_naive();
        let mut overdue = task(1, "late");
        overdue.due = Some(end_of_day(today - Days::new(3)).with_timezone(&Utc));
        let mut due_today = task(2, "now");
        due_today.due = Some(end_of_day(today).with_timezone(&Utc));
        let mut due_tomorrow = task(3, "soon");
        due_tomorrow.due = Some(end_of_day(today + Days::new(1)).with_timezone(&Utc));
        let mut later = task(4, "later");
        later.due = Some(end_of_day(today + Days::new(9)).with_timezone(&Utc));

        assert_eq!(due_cell(&overdue, now()), "2026-03-07!");
        assert_eq!(due_cell(&due_today, now()), "today");
        assert_eq!(due_cell(&due_tomorrow, now()), "tomorrow");
        assert_eq!(due_cell(&later, now()), "2026-03-19");
        assert_eq!(due_cell(&task(5, "none"), now()), "");
    }

    #[test]
    fn long_tag_lists_are_clipped() {
        let mut t = task(1, "tags");
        t.tags = vec!["#alpha".into(), "#beta".into(), "#gamma".into()];
        let lines = format_task_table(&[t], now());
        assert!(lines[2].contains("#alpha ..."));
    }

    #[test]
    fn detail_lists_populated_fields() {
        let mut t = task(7, "Finish report");
        t.description = "Q3 numbers".into();
        t.priority = 1;
        t.tags = vec!["#work".into(), "#urgent".into()];
        t.due = Some(end_of_day(now().date_naive()).with_timezone(&Utc));

        let lines = format_task_detail(&t, now());
        assert_eq!(lines[0], "Todo #7");
        assert!(lines.contains(&"Title:       Finish report".to_string()));
        assert!(lines.contains(&"Description: Q3 numbers".to_string()));
        assert!(lines.contains(&"Status:      Pending".to_string()));
        assert!(lines.contains(&"Priority:    1 (Urgent)".to_string()));
        assert!(lines.contains(&"Tags:        #work #urgent".to_string()));
        assert!(lines.contains(&"Due:         2026-03-10 23:59 (today)".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Completed:")));
    }

    #[test]
    fn detail_omits_empty_fields() {
        let lines = format_task_detail(&task(1, "bare"), now());
        assert!(!lines.iter().any(|l| l.starts_with("Description:")));
        assert!(!lines.iter().any(|l| l.starts_with("Priority:")));
        assert!(!lines.iter().any(|l| l.starts_with("Tags:")));
        assert!(!lines.iter().any(|l| l.starts_with("Due:")));
    }

    #[test]
    fn detail_json_adds_computed_fields() {
        let mut t = task(3, "x");
        t.priority = 4;
        let value = serde_json::to_value(task_detail_json(&t, now())).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["priority_label"], "Low");
        assert_eq!(value["overdue"], false);
    }
}
