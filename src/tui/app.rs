use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::store::TaskStore;
use crate::model::{Config, Query, Task};

use super::effect::{Effect, Worker};
use super::form::Form;
use super::selection::Selection;
use super::tag_picker::TagPicker;
use super::text_input::TextInput;
use super::theme::Theme;
use super::{input, render};

/// Maximum length of the search text
pub const SEARCH_LIMIT: usize = 100;

/// Active view, carrying the state that only exists while it is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    /// Snapshot of the task that was opened
    Detail(Task),
    /// Create or edit, see [`Form::kind`]
    Form(Form),
    Search(TextInput),
    TagFilter(TagPicker),
}

impl Mode {
    pub fn state_name(&self) -> &'static str {
        match self {
            Mode::Browsing => "Browsing",
            Mode::Detail(_) => "Detail",
            Mode::Form(form) => match form.kind {
                super::form::FormKind::Create => "FormCreate",
                super::form::FormKind::Edit(_) => "FormEdit",
            },
            Mode::Search(_) => "SearchEntry",
            Mode::TagFilter(_) => "TagFilterEntry",
        }
    }
}

/// Main application state
pub struct App {
    pub mode: Mode,
    /// Last loaded listing, in query order
    pub tasks: Vec<Task>,
    pub selection: Selection,
    pub query: Query,
    /// Collaborator failure shown under the current view
    pub error: Option<String>,
    /// A persistence call is in flight
    pub busy: bool,
    /// The first listing has arrived
    pub loaded: bool,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_help: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        App {
            mode: Mode::Browsing,
            tasks: Vec::new(),
            selection: Selection::default(),
            query: Query::pending(),
            error: None,
            busy: false,
            loaded: false,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_help: config.ui.show_help,
        }
    }

    /// The listing load that starts the session
    pub fn initial_effect(&self) -> Effect {
        Effect::Load(self.query.clone())
    }

    /// Task under the cursor, if the listing is non-empty
    pub fn current_task(&self) -> Option<&Task> {
        self.tasks.get(self.selection.cursor)
    }

    /// Reload the listing with the current query
    pub fn reload(&self) -> Option<Effect> {
        Some(Effect::Load(self.query.clone()))
    }

    /// Listing shows open tasks only
    pub fn pending_only(&self) -> bool {
        self.query.completed == Some(false)
    }
}

/// Run the TUI against `store` until the user quits
pub fn run(store: Box<dyn TaskStore>, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let worker = Worker::spawn(store)?;
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    tracing::info!("tui started");
    let result = run_event_loop(&mut terminal, &mut app, &worker);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    tracing::info!("tui stopped");

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &Worker,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut pending = Some(app.initial_effect());
    loop {
        if let Some(effect) = pending.take() {
            worker.submit(effect)?;
            app.busy = true;
        }

        terminal.draw(|frame| render::render(frame, app))?;

        // Keys wait until the in-flight call has been applied
        if app.busy {
            if let Some(completion) = worker.poll(Duration::from_millis(50))? {
                app.busy = false;
                pending = app.complete(completion);
            }
            continue;
        }

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            pending = input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
