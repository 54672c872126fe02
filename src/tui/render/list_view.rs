use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{DueLabel, SortKey, SortOrder, Task};
use crate::tui::app::App;
use crate::util::time::format_short;
use crate::util::unicode::ellipsize;

use super::helpers::{checkbox_span, due_style, priority_span, spans_width, tag_span, title_span};

/// Longest title shown in a row before it is cut with "..."
const TITLE_MAX: usize = 40;
/// Tags shown per row
const ROW_TAGS: usize = 2;
/// Title, blank, blank, status bar
const CHROME_ROWS: u16 = 4;

/// First row of the visible window. Scrolls just enough to keep the cursor
/// on the last visible row.
pub fn window_start(cursor: usize, height: usize) -> usize {
    if height > 0 && cursor >= height {
        cursor + 1 - height
    } else {
        0
    }
}

/// Header text with the active filters
pub fn header_text(app: &App) -> String {
    let mut title = String::from("TODO List");
    if let Some(search) = &app.query.search {
        title.push_str(&format!(" (search: {})", search));
    }
    if !app.query.tags.is_empty() {
        title.push_str(&format!(" (tags: {})", app.query.tags.join(", ")));
    }
    if !app.pending_only() {
        title.push_str(" [ALL]");
    }
    if app.query.sort != SortKey::default() || app.query.order != SortOrder::default() {
        title.push_str(&format!(
            " [sort: {} {}]",
            app.query.sort.name(),
            app.query.order.name()
        ));
    }
    title
}

/// Due annotation for a list row
pub fn due_text(task: &Task, now: DateTime<Local>) -> Option<(DueLabel, String)> {
    let due = task.due?;
    let label = task.due_label(now)?;
    let text = match label {
        DueLabel::Overdue => format!("{}!", format_short(due)),
        DueLabel::Today => "today".to_string(),
        DueLabel::Tomorrow => "tomorrow".to_string(),
        DueLabel::Plain => format_short(due),
    };
    Some((label, text))
}

pub fn render_list_view(frame: &mut Frame, app: &App, area: Rect, now: DateTime<Local>) {
    let theme = &app.theme;
    let bg = theme.background;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(title_span(&header_text(app), theme)));
    lines.push(Line::default());

    if !app.loaded {
        lines.push(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(theme.dim),
        )));
    } else if app.tasks.is_empty() {
        lines.push(Line::from(Span::styled(
            "No todos found. Press 'n' to add one.",
            Style::default().fg(theme.dim),
        )));
    } else {
        let height = area.height.saturating_sub(CHROME_ROWS).max(1) as usize;
        let start = window_start(app.selection.cursor, height);
        let end = (start + height).min(app.tasks.len());
        for (i, task) in app.tasks[start..end].iter().enumerate() {
            let is_cursor = start + i == app.selection.cursor;
            lines.push(task_row(app, task, is_cursor, area.width as usize, now));
        }
    }

    lines.push(Line::default());
    let mut status = format!(" {} todos ", app.tasks.len());
    if !app.selection.marked.is_empty() {
        status.push_str(&format!("| {} selected ", app.selection.marked.len()));
    }
    lines.push(Line::from(Span::styled(
        status,
        Style::default().fg(theme.text_bright).bg(theme.secondary),
    )));

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn task_row<'a>(
    app: &App,
    task: &'a Task,
    is_cursor: bool,
    width: usize,
    now: DateTime<Local>,
) -> Line<'a> {
    let theme = &app.theme;
    let mut spans: Vec<Span> = Vec::new();

    let indicator = if app.selection.is_marked(task.id) {
        Span::styled("● ", Style::default().fg(theme.highlight))
    } else if is_cursor {
        Span::styled("> ", Style::default().fg(theme.highlight))
    } else {
        Span::raw("  ")
    };
    spans.push(indicator);
    spans.push(checkbox_span(task.completed, theme));
    spans.push(Span::raw(" "));
    spans.push(priority_span(task, theme));

    let title_style = if task.completed {
        Style::default()
            .fg(theme.dim)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if is_cursor {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    spans.push(Span::raw(" "));
    spans.push(Span::styled(ellipsize(&task.title, TITLE_MAX), title_style));

    if let Some((label, text)) = due_text(task, now) {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(text, due_style(label, theme)));
    }

    for tag in task.tags.iter().take(ROW_TAGS) {
        let tag = tag_span(tag, theme);
        // Drop tags that would run past the edge
        if spans_width(&spans) + 1 + spans_width(std::slice::from_ref(&tag)) > width {
            break;
        }
        spans.push(Span::raw(" "));
        spans.push(tag);
    }

    Line::from(spans)
}
