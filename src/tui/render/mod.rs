pub mod detail_view;
pub mod form_view;
pub mod helpers;
pub mod list_view;
pub mod search_view;
pub mod tag_filter_view;

#[cfg(test)]
pub mod test_helpers;

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, Mode};

pub const LIST_HELP: &str = "j/k:navigate  space:toggle  x:mark  n:new  e:edit  /:search  t:tags  D:delete  tab:all/pending  s/o:sort  q:quit";
pub const DETAIL_HELP: &str = "space: toggle complete  e: edit  q/esc: back";
pub const FORM_HELP: &str =
    "tab/↓: next field  shift+tab/↑: prev field  ctrl+s/enter: save  esc: cancel";
pub const SEARCH_HELP: &str = "Enter: search  Esc: cancel";
pub const TAG_FILTER_HELP: &str = "j/k: navigate  space: toggle  enter: apply  esc: cancel";

/// Main render function. Dispatches on the active view.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: content | error line | help line
    let error_rows = u16::from(app.error.is_some());
    let help_rows = u16::from(app.show_help);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(error_rows),
            Constraint::Length(help_rows),
        ])
        .split(area);

    let now = Local::now();
    match &app.mode {
        Mode::Browsing => list_view::render_list_view(frame, app, chunks[0], now),
        Mode::Detail(task) => detail_view::render_detail_view(frame, app, task, chunks[0], now),
        Mode::Form(form) => form_view::render_form_view(frame, app, form, chunks[0]),
        Mode::Search(input) => search_view::render_search_view(frame, app, input, chunks[0]),
        Mode::TagFilter(picker) => {
            tag_filter_view::render_tag_filter_view(frame, app, picker, chunks[0])
        }
    }

    if let Some(error) = &app.error {
        render_error_line(frame, app, error, chunks[1]);
    }
    if app.show_help {
        let help = Line::from(Span::styled(
            help_text(&app.mode),
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ));
        frame.render_widget(Paragraph::new(help), chunks[2]);
    }
}

pub fn help_text(mode: &Mode) -> &'static str {
    match mode {
        Mode::Browsing => LIST_HELP,
        Mode::Detail(_) => DETAIL_HELP,
        Mode::Form(_) => FORM_HELP,
        Mode::Search(_) => SEARCH_HELP,
        Mode::TagFilter(_) => TAG_FILTER_HELP,
    }
}

fn render_error_line(frame: &mut Frame, app: &App, error: &str, area: Rect) {
    let line = Line::from(Span::styled(
        format!("Error: {}", error),
        Style::default()
            .fg(app.theme.red)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
