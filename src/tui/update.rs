use chrono::{Local, Utc};

use super::app::{App, Mode, SEARCH_LIMIT};
use super::effect::{Completion, Effect};
use super::form::{Form, FormKind};
use super::input::Action;
use super::tag_picker::TagPicker;
use super::text_input::TextInput;

impl App {
    /// Apply one user action to the active view. Returns the persistence
    /// call it triggers, if any.
    pub fn update(&mut self, action: Action) -> Option<Effect> {
        let before = self.mode.state_name();
        let effect = match self.mode {
            Mode::Browsing => self.update_browsing(action),
            Mode::Detail(_) => self.update_detail(action),
            Mode::Form(_) => self.update_form(action),
            Mode::Search(_) => self.update_search(action),
            Mode::TagFilter(_) => self.update_tag_filter(action),
        };
        let after = self.mode.state_name();
        if before != after {
            tracing::debug!(from = before, to = after, "view changed");
        }
        effect
    }

    fn update_browsing(&mut self, action: Action) -> Option<Effect> {
        let len = self.tasks.len();
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveCursor(delta) => self.selection.move_cursor(delta, len),
            Action::JumpFirst => self.selection.jump_first(),
            Action::JumpLast => self.selection.jump_last(len),
            Action::Open => {
                if let Some(task) = self.current_task().cloned() {
                    self.mode = Mode::Detail(task);
                }
            }
            Action::New => self.mode = Mode::Form(Form::new()),
            Action::Edit => {
                if let Some(task) = self.current_task() {
                    self.mode = Mode::Form(Form::load_from(task));
                }
            }
            Action::StartSearch => {
                let mut input = TextInput::new(SEARCH_LIMIT);
                if let Some(search) = &self.query.search {
                    input.set(search);
                }
                self.mode = Mode::Search(input);
            }
            Action::StartTagFilter => {
                self.mode = Mode::TagFilter(TagPicker::seeded(&self.query.tags));
                return Some(Effect::LoadTags);
            }
            Action::ToggleComplete => {
                let mut task = self.current_task()?.clone();
                task.toggle_completed(Utc::now());
                return Some(Effect::Update(task));
            }
            Action::ToggleMark => {
                if let Some(id) = self.current_task().map(|t| t.id) {
                    self.selection.toggle_mark(id);
                }
            }
            Action::Delete => {
                let targets = self.selection.targets(&self.tasks);
                if !targets.is_empty() {
                    return Some(Effect::Delete(targets));
                }
            }
            Action::CyclePriority => {
                let mut task = self.current_task()?.clone();
                task.cycle_priority();
                return Some(Effect::Update(task));
            }
            Action::ToggleScope => {
                self.query.completed = if self.pending_only() {
                    None
                } else {
                    Some(false)
                };
                return self.reload();
            }
            Action::CycleSort => {
                self.query.sort = self.query.sort.cycle();
                return self.reload();
            }
            Action::FlipOrder => {
                self.query.order = self.query.order.flip();
                return self.reload();
            }
            _ => {}
        }
        None
    }

    fn update_detail(&mut self, action: Action) -> Option<Effect> {
        let Mode::Detail(task) = &self.mode else {
            return None;
        };
        match action {
            Action::Quit => self.should_quit = true,
            Action::Back => self.mode = Mode::Browsing,
            Action::Edit => self.mode = Mode::Form(Form::load_from(task)),
            Action::ToggleComplete => {
                let mut task = task.clone();
                task.toggle_completed(Utc::now());
                self.mode = Mode::Browsing;
                return Some(Effect::Update(task));
            }
            _ => {}
        }
        None
    }

    fn update_form(&mut self, action: Action) -> Option<Effect> {
        let Mode::Form(form) = &mut self.mode else {
            return None;
        };
        match action {
            Action::Cancel => self.mode = Mode::Browsing,
            Action::FocusNext => form.advance_focus(1),
            Action::FocusPrev => form.advance_focus(-1),
            Action::Submit if !form.on_last_field() => form.advance_focus(1),
            Action::Submit | Action::Save => return save_form(form),
            Action::Text(edit) => form.edit_focused(edit),
            _ => {}
        }
        None
    }

    fn update_search(&mut self, action: Action) -> Option<Effect> {
        let Mode::Search(input) = &mut self.mode else {
            return None;
        };
        match action {
            Action::Cancel => {
                self.query.search = None;
                self.mode = Mode::Browsing;
                self.reload()
            }
            Action::Submit => {
                let text = input.value().to_string();
                self.query = std::mem::take(&mut self.query).with_search(&text);
                self.mode = Mode::Browsing;
                self.reload()
            }
            Action::Text(edit) => {
                input.apply(edit);
                None
            }
            _ => None,
        }
    }

    fn update_tag_filter(&mut self, action: Action) -> Option<Effect> {
        let Mode::TagFilter(picker) = &mut self.mode else {
            return None;
        };
        match action {
            Action::Cancel => self.mode = Mode::Browsing,
            Action::MoveCursor(delta) => picker.move_cursor(delta),
            Action::ToggleMark => picker.toggle(),
            Action::Submit => {
                self.query.tags = picker.selection();
                self.mode = Mode::Browsing;
                return self.reload();
            }
            _ => {}
        }
        None
    }

    /// Apply the result of a persistence call. Returns the follow-up call,
    /// usually a reload.
    pub fn complete(&mut self, completion: Completion) -> Option<Effect> {
        match completion {
            Completion::Loaded(Ok(tasks)) => {
                self.tasks = tasks;
                self.loaded = true;
                self.selection.clamp(self.tasks.len());
                None
            }
            Completion::TagsLoaded(Ok(tags)) => {
                if let Mode::TagFilter(picker) = &mut self.mode {
                    picker.set_tags(tags);
                }
                None
            }
            Completion::Created(Ok(task)) | Completion::Edited(Ok(task)) => {
                tracing::info!(id = task.id, "saved task");
                if matches!(self.mode, Mode::Form(_)) {
                    self.mode = Mode::Browsing;
                }
                self.reload()
            }
            Completion::Created(Err(e)) | Completion::Edited(Err(e)) => {
                if let Mode::Form(form) = &mut self.mode {
                    form.saving = false;
                    form.error = Some(e.to_string());
                } else {
                    self.error = Some(e.to_string());
                }
                None
            }
            Completion::Updated(Ok(_)) => self.reload(),
            Completion::Deleted { removed, result } => {
                self.selection.unmark_all(&removed);
                if let Err(e) = result {
                    self.error = Some(e.to_string());
                }
                if removed.is_empty() {
                    None
                } else {
                    self.reload()
                }
            }
            Completion::TagsLoaded(Err(e)) => {
                // leave the picker usable with just the "All tags" row
                if let Mode::TagFilter(picker) = &mut self.mode {
                    picker.set_tags(Vec::new());
                }
                self.error = Some(e.to_string());
                None
            }
            Completion::Loaded(Err(e)) | Completion::Updated(Err(e)) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

fn save_form(form: &mut Form) -> Option<Effect> {
    if form.saving {
        return None;
    }
    match form.validate(Local::now()) {
        Ok(draft) => {
            form.error = None;
            form.saving = true;
            Some(match form.kind {
                FormKind::Create => Effect::Create(draft.into_task()),
                FormKind::Edit(id) => Effect::Edit { id, draft },
            })
        }
        Err(e) => {
            form.error = Some(e.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::memory_store::MemoryStore;
    use crate::io::store::{StoreError, TaskStore};
    use crate::model::{Config, Query, SortKey, SortOrder, Task, TaskId};
    use crate::tui::effect::execute;
    use crate::tui::form::{DUE, PRIORITY, TAGS, TITLE};
    use crate::tui::text_input::TextEdit;

    /// Runs effects synchronously, feeding each completion back in
    struct Driver<S: TaskStore> {
        app: App,
        store: S,
    }

    impl<S: TaskStore> Driver<S> {
        fn new(store: S) -> Self {
            let mut driver = Driver {
                app: App::new(&Config::default()),
                store,
            };
            let effect = driver.app.initial_effect();
            driver.run(Some(effect));
            driver
        }

        fn run(&mut self, mut effect: Option<Effect>) {
            while let Some(e) = effect.take() {
                effect = self.app.complete(execute(&mut self.store, e));
            }
        }

        fn press(&mut self, action: Action) {
            let effect = self.app.update(action);
            self.run(effect);
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.press(Action::Text(TextEdit::Insert(c)));
            }
        }

        fn titles(&self) -> Vec<&str> {
            self.app.tasks.iter().map(|t| t.title.as_str()).collect()
        }
    }

    fn seeded(titles: &[&str]) -> MemoryStore {
        let mut store = MemoryStore::new();
        for title in titles {
            store.create(Task::new(*title)).unwrap();
        }
        store
    }

    /// Store whose writes all fail
    struct ReadOnlyStore(MemoryStore);

    impl TaskStore for ReadOnlyStore {
        fn create(&mut self, _task: Task) -> Result<Task, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
        fn get(&self, id: TaskId) -> Result<Task, StoreError> {
            self.0.get(id)
        }
        fn list(&self, query: &Query) -> Result<Vec<Task>, StoreError> {
            self.0.list(query)
        }
        fn update(&mut self, _task: Task) -> Result<Task, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
        fn delete(&mut self, _id: TaskId) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
        fn tags(&self) -> Result<Vec<String>, StoreError> {
            self.0.tags()
        }
    }

    #[test]
    fn initial_load_lists_pending_tasks() {
        let driver = Driver::new(seeded(&["a", "b"]));
        assert!(driver.app.loaded);
        assert_eq!(driver.app.mode, Mode::Browsing);
        // newest first
        assert_eq!(driver.titles(), vec!["b", "a"]);
    }

    #[test]
    fn completing_hides_task_until_scope_shows_all() {
        let mut driver = Driver::new(MemoryStore::new());
        driver.press(Action::New);
        driver.type_text("Buy milk");
        driver.press(Action::Save);
        assert_eq!(driver.app.mode, Mode::Browsing);
        assert_eq!(driver.titles(), vec!["Buy milk"]);
        assert!(driver.app.tasks[0].due.is_none());
        assert_eq!(driver.app.tasks[0].priority, 0);

        driver.press(Action::ToggleComplete);
        assert!(driver.app.tasks.is_empty());
        assert_eq!(driver.app.selection.cursor, 0);

        driver.press(Action::ToggleScope);
        assert!(!driver.app.pending_only());
        assert_eq!(driver.titles(), vec!["Buy milk"]);
        assert!(driver.app.tasks[0].completed);
        assert!(driver.app.tasks[0].completed_at.is_some());

        driver.press(Action::ToggleScope);
        assert!(driver.app.pending_only());
        assert!(driver.app.tasks.is_empty());
    }

    #[test]
    fn bulk_delete_removes_marked_and_clears_marks() {
        let mut driver = Driver::new(seeded(&["a", "b", "c"]));
        driver.press(Action::ToggleMark);
        driver.press(Action::MoveCursor(1));
        driver.press(Action::ToggleMark);
        assert_eq!(driver.app.selection.marked.len(), 2);

        driver.press(Action::Delete);
        assert_eq!(driver.titles(), vec!["a"]);
        assert!(driver.app.selection.marked.is_empty());
        assert_eq!(driver.app.selection.cursor, 0);
        assert_eq!(driver.store.len(), 1);
    }

    #[test]
    fn delete_without_marks_takes_cursor_task() {
        let mut driver = Driver::new(seeded(&["a", "b"]));
        driver.press(Action::JumpLast);
        driver.press(Action::Delete);
        assert_eq!(driver.titles(), vec!["b"]);
        // cursor was on the last row and the list shrank
        assert_eq!(driver.app.selection.cursor, 0);
    }

    #[test]
    fn delete_on_empty_list_does_nothing() {
        let mut app = App::new(&Config::default());
        assert_eq!(app.update(Action::Delete), None);
        assert_eq!(app.update(Action::ToggleComplete), None);
        assert_eq!(app.update(Action::Edit), None);
        assert_eq!(app.update(Action::Open), None);
        assert_eq!(app.mode, Mode::Browsing);
    }

    #[test]
    fn cycle_priority_updates_store() {
        let mut driver = Driver::new(seeded(&["a"]));
        driver.press(Action::CyclePriority);
        assert_eq!(driver.app.tasks[0].priority, 1);
        driver.press(Action::CyclePriority);
        assert_eq!(driver.app.tasks[0].priority, 2);
    }

    #[test]
    fn detail_toggle_returns_to_list() {
        let mut driver = Driver::new(seeded(&["a"]));
        driver.press(Action::Open);
        assert!(matches!(driver.app.mode, Mode::Detail(ref t) if t.title == "a"));

        driver.press(Action::ToggleComplete);
        assert_eq!(driver.app.mode, Mode::Browsing);
        assert!(driver.app.tasks.is_empty());
        assert!(driver.store.get(1).unwrap().completed);
    }

    #[test]
    fn detail_back_and_quit() {
        let mut driver = Driver::new(seeded(&["a"]));
        driver.press(Action::Open);
        driver.press(Action::Back);
        assert_eq!(driver.app.mode, Mode::Browsing);
        driver.press(Action::Open);
        driver.press(Action::Quit);
        assert!(driver.app.should_quit);
    }

    #[test]
    fn form_validation_error_keeps_form_open() {
        let mut driver = Driver::new(MemoryStore::new());
        driver.press(Action::New);
        driver.press(Action::Save);
        match &driver.app.mode {
            Mode::Form(form) => {
                assert_eq!(form.error.as_deref(), Some("Title is required"));
                assert!(!form.saving);
            }
            other => panic!("unexpected mode {:?}", other),
        }
        assert!(driver.store.is_empty());

        driver.type_text("x");
        driver.press(Action::FocusPrev);
        assert!(matches!(&driver.app.mode, Mode::Form(f) if f.focus == PRIORITY));
        driver.type_text("9");
        driver.press(Action::Submit);
        match &driver.app.mode {
            Mode::Form(form) => assert_eq!(form.error.as_deref(), Some("Priority must be 1-5")),
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn enter_advances_until_last_field() {
        let mut driver = Driver::new(MemoryStore::new());
        driver.press(Action::New);
        driver.type_text("task");
        for _ in 0..4 {
            driver.press(Action::Submit);
        }
        assert!(matches!(&driver.app.mode, Mode::Form(f) if f.focus == PRIORITY));
        assert!(driver.store.is_empty());

        driver.press(Action::Submit);
        assert_eq!(driver.app.mode, Mode::Browsing);
        assert_eq!(driver.titles(), vec!["task"]);
    }

    #[test]
    fn edit_saves_fields_to_stored_task() {
        let mut store = MemoryStore::new();
        let mut task = Task::new("old");
        task.priority = 3;
        store.create(task).unwrap();
        let mut driver = Driver::new(store);

        driver.press(Action::Edit);
        assert_eq!(driver.app.mode.state_name(), "FormEdit");
        driver.press(Action::Text(TextEdit::KillToStart));
        driver.type_text("new");
        if let Mode::Form(form) = &mut driver.app.mode {
            form.focus = PRIORITY;
        }
        driver.press(Action::Text(TextEdit::Backspace));
        driver.press(Action::Save);

        assert_eq!(driver.app.mode, Mode::Browsing);
        let stored = driver.store.get(1).unwrap();
        assert_eq!(stored.title, "new");
        assert_eq!(stored.priority, 0);
        assert_eq!(driver.titles(), vec!["new"]);
    }

    #[test]
    fn cancel_discards_form() {
        let mut driver = Driver::new(seeded(&["keep"]));
        driver.press(Action::Edit);
        driver.type_text(" me");
        driver.press(Action::Cancel);
        assert_eq!(driver.app.mode, Mode::Browsing);
        assert_eq!(driver.store.get(1).unwrap().title, "keep");
        assert_eq!(driver.titles(), vec!["keep"]);
    }

    #[test]
    fn invalid_due_date_is_reported() {
        let mut driver = Driver::new(MemoryStore::new());
        driver.press(Action::New);
        driver.type_text("x");
        if let Mode::Form(form) = &mut driver.app.mode {
            form.focus = DUE;
        }
        driver.type_text("someday");
        driver.press(Action::Save);
        assert!(
            matches!(&driver.app.mode, Mode::Form(f) if f.error.as_deref() == Some("Invalid due date format"))
        );
    }

    #[test]
    fn save_failure_stays_on_form() {
        let mut driver = Driver::new(ReadOnlyStore(MemoryStore::new()));
        driver.press(Action::New);
        driver.type_text("x");
        driver.press(Action::Save);
        match &driver.app.mode {
            Mode::Form(form) => {
                assert!(form.error.as_deref().is_some_and(|e| e.contains("disk full")));
                assert!(!form.saving);
                assert_eq!(form.value(TITLE), "x");
            }
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn failed_update_shows_error_without_transition() {
        let mut driver = Driver::new(ReadOnlyStore(seeded(&["a"])));
        driver.press(Action::ToggleComplete);
        assert_eq!(driver.app.mode, Mode::Browsing);
        assert!(driver.app.error.as_deref().is_some_and(|e| e.contains("disk full")));
        assert!(!driver.app.tasks[0].completed);
    }

    #[test]
    fn failed_delete_keeps_marks() {
        let mut driver = Driver::new(ReadOnlyStore(seeded(&["a", "b"])));
        driver.press(Action::ToggleMark);
        driver.press(Action::Delete);
        assert_eq!(driver.app.selection.marked.len(), 1);
        assert!(driver.app.error.is_some());
        assert_eq!(driver.titles().len(), 2);
    }

    /// Store whose reads fail once `failing` is set
    struct FlakyReads {
        inner: MemoryStore,
        failing: bool,
    }

    impl FlakyReads {
        fn check(&self) -> Result<(), StoreError> {
            if self.failing {
                return Err(StoreError::Io(std::io::Error::other("connection lost")));
            }
            Ok(())
        }
    }

    impl TaskStore for FlakyReads {
        fn create(&mut self, task: Task) -> Result<Task, StoreError> {
            self.inner.create(task)
        }
        fn get(&self, id: TaskId) -> Result<Task, StoreError> {
            self.inner.get(id)
        }
        fn list(&self, query: &Query) -> Result<Vec<Task>, StoreError> {
            self.check()?;
            self.inner.list(query)
        }
        fn update(&mut self, task: Task) -> Result<Task, StoreError> {
            self.inner.update(task)
        }
        fn delete(&mut self, id: TaskId) -> Result<(), StoreError> {
            self.inner.delete(id)
        }
        fn tags(&self) -> Result<Vec<String>, StoreError> {
            self.check()?;
            self.inner.tags()
        }
    }

    #[test]
    fn mark_on_externally_deleted_task_is_cleared() {
        let mut driver = Driver::new(seeded(&["a", "b"]));
        // cursor on "b" (newest first), mark it, then remove it behind our back
        driver.press(Action::ToggleMark);
        let gone = driver.app.tasks[0].id;
        driver.store.delete(gone).unwrap();

        driver.press(Action::Delete);
        assert!(driver.app.selection.marked.is_empty());
        assert!(driver.app.error.as_deref().is_some_and(|e| e.contains("not found")));
        assert_eq!(driver.titles(), vec!["a"]);

        driver.press(Action::ToggleMark);
        driver.press(Action::Delete);
        assert!(driver.app.selection.marked.is_empty());
        assert!(driver.store.is_empty());
        assert!(driver.app.tasks.is_empty());
    }

    #[test]
    fn missing_marked_task_does_not_block_the_rest() {
        let mut driver = Driver::new(seeded(&["a", "b", "c"]));
        driver.press(Action::ToggleMark);
        driver.press(Action::MoveCursor(1));
        driver.press(Action::ToggleMark);
        driver.press(Action::MoveCursor(1));
        driver.press(Action::ToggleMark);
        driver.store.delete(1).unwrap();

        driver.press(Action::Delete);
        assert!(driver.app.selection.marked.is_empty());
        assert!(driver.store.is_empty());
        assert!(driver.app.error.is_some());
    }

    #[test]
    fn detail_edit_loads_bound_task() {
        let mut store = MemoryStore::new();
        let mut task = Task::new("report");
        task.description = "numbers".into();
        task.tags = vec!["#work".into(), "#q3".into()];
        task.priority = 2;
        store.create(task).unwrap();
        let mut driver = Driver::new(store);

        driver.press(Action::Open);
        assert_eq!(driver.app.mode.state_name(), "Detail");
        driver.press(Action::Edit);
        assert_eq!(driver.app.mode.state_name(), "FormEdit");
        match &driver.app.mode {
            Mode::Form(form) => {
                assert_eq!(form.focus, TITLE);
                assert_eq!(form.value(TITLE), "report");
                assert_eq!(form.value(TAGS), "#work #q3");
                assert_eq!(form.value(PRIORITY), "2");
                assert_eq!(form.value(DUE), "");
            }
            other => panic!("unexpected mode {:?}", other),
        }

        driver.type_text("!");
        driver.press(Action::Save);
        assert_eq!(driver.app.mode, Mode::Browsing);
        assert_eq!(driver.store.get(1).unwrap().title, "report!");
    }

    #[test]
    fn failed_reload_keeps_cached_list() {
        let store = FlakyReads {
            inner: seeded(&["a", "b"]),
            failing: false,
        };
        let mut driver = Driver::new(store);
        driver.store.failing = true;

        driver.press(Action::ToggleScope);
        assert_eq!(driver.app.mode, Mode::Browsing);
        assert!(driver.app.error.as_deref().is_some_and(|e| e.contains("connection lost")));
        assert_eq!(driver.titles(), vec!["b", "a"]);

        driver.press(Action::Open);
        assert_eq!(driver.app.mode.state_name(), "Detail");
    }

    #[test]
    fn failed_tag_load_stays_in_picker() {
        let store = FlakyReads {
            inner: seeded(&["a"]),
            failing: false,
        };
        let mut driver = Driver::new(store);
        driver.store.failing = true;

        driver.press(Action::StartTagFilter);
        assert_eq!(driver.app.mode.state_name(), "TagFilterEntry");
        assert!(driver.app.error.as_deref().is_some_and(|e| e.contains("connection lost")));
        assert!(matches!(&driver.app.mode, Mode::TagFilter(p) if p.tags.as_deref() == Some(&[][..])));
        assert_eq!(driver.titles(), vec!["a"]);

        driver.press(Action::Cancel);
        assert_eq!(driver.app.mode, Mode::Browsing);
    }

    #[test]
    fn search_commit_and_cancel() {
        let mut driver = Driver::new(seeded(&["buy milk", "call mom", "Milk run"]));
        driver.press(Action::StartSearch);
        assert_eq!(driver.app.mode.state_name(), "SearchEntry");
        driver.type_text("milk");
        driver.press(Action::Submit);
        assert_eq!(driver.app.query.search.as_deref(), Some("milk"));
        assert_eq!(driver.titles(), vec!["Milk run", "buy milk"]);

        // reopening keeps the current text
        driver.press(Action::StartSearch);
        assert!(matches!(&driver.app.mode, Mode::Search(i) if i.value() == "milk"));
        driver.press(Action::Cancel);
        assert_eq!(driver.app.mode, Mode::Browsing);
        assert!(driver.app.query.search.is_none());
        assert_eq!(driver.titles().len(), 3);
    }

    #[test]
    fn blank_search_clears_filter() {
        let mut driver = Driver::new(seeded(&["a"]));
        driver.press(Action::StartSearch);
        driver.type_text("   ");
        driver.press(Action::Submit);
        assert!(driver.app.query.search.is_none());
    }

    #[test]
    fn tag_filter_commit_and_cancel() {
        let mut store = MemoryStore::new();
        let mut work = Task::new("report");
        work.tags = vec!["#work".into(), "#x".into()];
        store.create(work).unwrap();
        let mut home = Task::new("dishes");
        home.tags = vec!["#home".into()];
        store.create(home).unwrap();
        let mut driver = Driver::new(store);

        driver.press(Action::StartTagFilter);
        match &driver.app.mode {
            Mode::TagFilter(picker) => {
                assert_eq!(
                    picker.tags.as_deref(),
                    Some(&["#home".to_string(), "#work".into(), "#x".into()][..])
                );
            }
            other => panic!("unexpected mode {:?}", other),
        }
        driver.press(Action::MoveCursor(2));
        driver.press(Action::ToggleMark);
        driver.press(Action::Submit);
        assert_eq!(driver.app.query.tags, vec!["#work"]);
        assert_eq!(driver.titles(), vec!["report"]);

        // cancel leaves the committed filter alone
        driver.press(Action::StartTagFilter);
        assert!(matches!(&driver.app.mode, Mode::TagFilter(p) if p.is_chosen("#work")));
        driver.press(Action::ToggleMark);
        driver.press(Action::Cancel);
        assert_eq!(driver.app.query.tags, vec!["#work"]);

        // the "All tags" row clears it
        driver.press(Action::StartTagFilter);
        driver.press(Action::ToggleMark);
        driver.press(Action::Submit);
        assert!(driver.app.query.tags.is_empty());
        assert_eq!(driver.titles().len(), 2);
    }

    #[test]
    fn sort_controls_rebuild_query() {
        let mut store = MemoryStore::new();
        for (title, p) in [("low", 5), ("none", 0), ("urgent", 1)] {
            let mut t = Task::new(title);
            t.priority = p;
            store.create(t).unwrap();
        }
        let mut driver = Driver::new(store);
        driver.press(Action::CycleSort);
        driver.press(Action::CycleSort);
        driver.press(Action::CycleSort);
        assert_eq!(driver.app.query.sort, SortKey::Priority);
        assert_eq!(driver.titles(), vec!["low", "urgent", "none"]);

        driver.press(Action::FlipOrder);
        assert_eq!(driver.app.query.order, SortOrder::Asc);
        assert_eq!(driver.titles(), vec!["urgent", "low", "none"]);
    }

    #[test]
    fn cursor_is_clamped_after_reload() {
        let mut driver = Driver::new(seeded(&["a", "b", "c"]));
        driver.press(Action::JumpLast);
        assert_eq!(driver.app.selection.cursor, 2);
        driver.press(Action::ToggleComplete);
        assert_eq!(driver.app.tasks.len(), 2);
        assert_eq!(driver.app.selection.cursor, 1);
        driver.press(Action::ToggleComplete);
        driver.press(Action::ToggleComplete);
        assert!(driver.app.tasks.is_empty());
        assert_eq!(driver.app.selection.cursor, 0);
    }

    #[test]
    fn cursor_wraps_in_list() {
        let mut driver = Driver::new(seeded(&["a", "b"]));
        driver.press(Action::MoveCursor(-1));
        assert_eq!(driver.app.selection.cursor, 1);
        driver.press(Action::MoveCursor(1));
        assert_eq!(driver.app.selection.cursor, 0);
    }

    #[test]
    fn quit_only_from_list_and_detail() {
        let mut app = App::new(&Config::default());
        app.update(Action::New);
        app.update(Action::Quit);
        assert!(!app.should_quit);
        app.update(Action::Cancel);
        app.update(Action::Quit);
        assert!(app.should_quit);
    }
}
