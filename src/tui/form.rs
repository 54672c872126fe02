use chrono::{DateTime, Local, Utc};

use crate::model::{MAX_PRIORITY, Task, TaskId};
use crate::parse::{parse_due, parse_tags};
use crate::util::time::format_day;

use super::text_input::{TextEdit, TextInput};

pub const FIELD_COUNT: usize = 5;

pub const TITLE: usize = 0;
pub const DESCRIPTION: usize = 1;
pub const TAGS: usize = 2;
pub const DUE: usize = 3;
pub const PRIORITY: usize = 4;

pub const FIELD_LABELS: [&str; FIELD_COUNT] =
    ["Title", "Description", "Tags", "Due Date", "Priority (1-5)"];

pub const FIELD_PLACEHOLDERS: [&str; FIELD_COUNT] = [
    "What needs to be done?",
    "Optional details...",
    "#work #urgent",
    "2026-02-14 or today/tomorrow",
    "1-5 (1=urgent, 5=lowest)",
];

const TEXT_LIMIT: usize = 200;

/// Validation failure on save. Messages are shown verbatim under the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Priority must be 1-5")]
    PriorityOutOfRange,
    #[error("Invalid due date format")]
    InvalidDueDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Create,
    /// Editing the stored task with this id
    Edit(TaskId),
}

/// Validated field values, ready to become a new task or overwrite a stored one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub due: Option<DateTime<Utc>>,
    /// 0 when the field was left empty
    pub priority: u8,
}

impl Draft {
    pub fn into_task(self) -> Task {
        let mut task = Task::new(self.title);
        task.description = self.description;
        task.tags = self.tags;
        task.due = self.due;
        task.priority = self.priority;
        task
    }

    /// Overwrite the editable fields of `task`. Completion state is untouched.
    pub fn apply_to(self, task: &mut Task) {
        task.title = self.title;
        task.description = self.description;
        task.tags = self.tags;
        task.due = self.due;
        task.priority = self.priority;
    }
}

/// Add/edit form: five text fields, a focus index and a pending error.
///
/// Holds copies of the task's values; nothing outside the form changes until
/// a validated save has been applied by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub kind: FormKind,
    pub fields: [TextInput; FIELD_COUNT],
    pub focus: usize,
    pub error: Option<String>,
    /// A save is in flight; the form stays visible until it resolves
    pub saving: bool,
}

impl Form {
    /// Empty create form focused on the title.
    pub fn new() -> Self {
        Form {
            kind: FormKind::Create,
            fields: [
                TextInput::new(TEXT_LIMIT),
                TextInput::new(TEXT_LIMIT),
                TextInput::new(TEXT_LIMIT),
                TextInput::new(TEXT_LIMIT),
                TextInput::new(1),
            ],
            focus: TITLE,
            error: None,
            saving: false,
        }
    }

    /// Edit form pre-filled from `task`.
    pub fn load_from(task: &Task) -> Self {
        let mut form = Form::new();
        form.kind = FormKind::Edit(task.id);
        form.fields[TITLE].set(&task.title);
        form.fields[DESCRIPTION].set(&task.description);
        form.fields[TAGS].set(&task.tags.join(" "));
        if let Some(due) = task.due {
            form.fields[DUE].set(&format_day(due));
        }
        if task.priority > 0 {
            form.fields[PRIORITY].set(&task.priority.to_string());
        }
        form
    }

    /// Clear every field and focus the title.
    pub fn reset(&mut self) {
        *self = Form::new();
    }

    pub fn header(&self) -> &'static str {
        match self.kind {
            FormKind::Create => "New Todo",
            FormKind::Edit(_) => "Edit Todo",
        }
    }

    /// Move focus by `delta`, wrapping across the five fields.
    pub fn advance_focus(&mut self, delta: isize) {
        self.focus = (self.focus as isize + delta).rem_euclid(FIELD_COUNT as isize) as usize;
    }

    pub fn on_last_field(&self) -> bool {
        self.focus == FIELD_COUNT - 1
    }

    pub fn edit_focused(&mut self, edit: TextEdit) {
        self.fields[self.focus].apply(edit);
    }

    pub fn value(&self, field: usize) -> &str {
        self.fields[field].value()
    }

    /// Check the fields and build a [`Draft`]. Checks run title, due, priority.
    pub fn validate(&self, now: DateTime<Local>) -> Result<Draft, FormError> {
        let title = self.value(TITLE).trim();
        if title.is_empty() {
            return Err(FormError::TitleRequired);
        }

        let due_text = self.value(DUE).trim();
        let due = if due_text.is_empty() {
            None
        } else {
            Some(parse_due(due_text, now).map_err(|_| FormError::InvalidDueDate)?)
        };

        let priority_text = self.value(PRIORITY).trim();
        let priority = if priority_text.is_empty() {
            0
        } else {
            match priority_text.parse::<u8>() {
                Ok(p) if (1..=MAX_PRIORITY).contains(&p) => p,
                _ => return Err(FormError::PriorityOutOfRange),
            }
        };

        Ok(Draft {
            title: title.to_string(),
            description: self.value(DESCRIPTION).trim().to_string(),
            tags: parse_tags(self.value(TAGS)),
            due,
            priority,
        })
    }
}

impl Default for Form {
    fn default() -> Self {
        Form::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::time::end_of_day;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn fill(form: &mut Form, field: usize, text: &str) {
        form.fields[field].set(text);
    }

    #[test]
    fn new_form_is_empty_and_focused_on_title() {
        let form = Form::new();
        assert_eq!(form.kind, FormKind::Create);
        assert_eq!(form.focus, TITLE);
        assert!(form.fields.iter().all(|f| f.value().is_empty()));
        assert_eq!(form.header(), "New Todo");
    }

    #[test]
    fn focus_cycles_through_five_fields() {
        let mut form = Form::new();
        for expected in [1, 2, 3, 4, 0] {
            form.advance_focus(1);
            assert_eq!(form.focus, expected);
        }
        form.advance_focus(-1);
        assert_eq!(form.focus, PRIORITY);
        assert!(form.on_last_field());
    }

    #[test]
    fn load_from_task() {
        let mut task = Task::new("Report");
        task.id = 9;
        task.description = "Q3".into();
        task.tags = vec!["#work".into(), "#urgent".into()];
        task.due = Some(
            end_of_day(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()).with_timezone(&Utc),
        );
        task.priority = 2;

        let form = Form::load_from(&task);
        assert_eq!(form.kind, FormKind::Edit(9));
        assert_eq!(form.header(), "Edit Todo");
        assert_eq!(form.value(TITLE), "Report");
        assert_eq!(form.value(DESCRIPTION), "Q3");
        assert_eq!(form.value(TAGS), "#work #urgent");
        assert_eq!(form.value(DUE), "2026-02-14");
        assert_eq!(form.value(PRIORITY), "2");
        assert_eq!(form.focus, TITLE);
    }

    #[test]
    fn unset_priority_loads_as_empty() {
        let form = Form::load_from(&Task::new("x"));
        assert_eq!(form.value(PRIORITY), "");
        assert_eq!(form.value(DUE), "");
    }

    #[test]
    fn reset_discards_everything() {
        let mut form = Form::load_from(&Task::new("x"));
        form.error = Some("boom".into());
        form.advance_focus(2);
        form.reset();
        assert_eq!(form, Form::new());
    }

    #[test]
    fn title_is_required() {
        let mut form = Form::new();
        fill(&mut form, TITLE, "   ");
        assert_eq!(form.validate(now()), Err(FormError::TitleRequired));
        assert_eq!(FormError::TitleRequired.to_string(), "Title is required");
    }

    #[test]
    fn priority_must_be_one_to_five() {
        let mut form = Form::new();
        fill(&mut form, TITLE, "x");
        for bad in ["0", "7", "a"] {
            fill(&mut form, PRIORITY, bad);
            assert_eq!(form.validate(now()), Err(FormError::PriorityOutOfRange));
        }
        assert_eq!(
            FormError::PriorityOutOfRange.to_string(),
            "Priority must be 1-5"
        );
    }

    #[test]
    fn due_date_must_parse() {
        let mut form = Form::new();
        fill(&mut form, TITLE, "x");
        fill(&mut form, DUE, "someday");
        assert_eq!(form.validate(now()), Err(FormError::InvalidDueDate));
        assert_eq!(
            FormError::InvalidDueDate.to_string(),
            "Invalid due date format"
        );
    }

    #[test]
    fn due_error_reported_before_priority() {
        let mut form = Form::new();
        fill(&mut form, TITLE, "x");
        fill(&mut form, DUE, "someday");
        fill(&mut form, PRIORITY, "9");
        assert_eq!(form.validate(now()), Err(FormError::InvalidDueDate));

        fill(&mut form, DUE, "");
        assert_eq!(form.validate(now()), Err(FormError::PriorityOutOfRange));
    }

    #[test]
    fn valid_form_builds_draft() {
        let mut form = Form::new();
        fill(&mut form, TITLE, "  Buy milk ");
        fill(&mut form, DESCRIPTION, " two litres ");
        fill(&mut form, TAGS, "home #errand");
        fill(&mut form, DUE, "tomorrow");
        fill(&mut form, PRIORITY, "3");

        let draft = form.validate(now()).unwrap();
        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.description, "two litres");
        assert_eq!(draft.tags, vec!["#home", "#errand"]);
        assert_eq!(draft.priority, 3);
        let expected = end_of_day(NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
        assert_eq!(draft.due, Some(expected.with_timezone(&Utc)));

        let task = draft.into_task();
        assert_eq!(task.id, 0);
        assert!(!task.completed);
    }

    #[test]
    fn empty_optional_fields_clear_values_on_edit() {
        let mut stored = Task::new("old");
        stored.id = 3;
        stored.priority = 4;
        stored.due = Some(Utc::now());
        stored.set_completed(true, Utc::now());

        let mut form = Form::load_from(&stored);
        fill(&mut form, DUE, "");
        fill(&mut form, PRIORITY, "");
        fill(&mut form, TITLE, "new");
        let draft = form.validate(now()).unwrap();

        let mut updated = stored.clone();
        draft.apply_to(&mut updated);
        assert_eq!(updated.title, "new");
        assert_eq!(updated.priority, 0);
        assert!(updated.due.is_none());
        assert!(updated.completed);
        assert_eq!(updated.id, 3);
    }

    #[test]
    fn priority_field_holds_one_character() {
        let mut form = Form::new();
        form.focus = PRIORITY;
        form.edit_focused(TextEdit::Insert('1'));
        form.edit_focused(TextEdit::Insert('2'));
        assert_eq!(form.value(PRIORITY), "1");
    }
}
