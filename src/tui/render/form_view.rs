use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::tui::app::App;
use crate::tui::form::{FIELD_COUNT, FIELD_LABELS, FIELD_PLACEHOLDERS, Form};
use crate::tui::text_input::TextInput;
use crate::tui::theme::Theme;

use super::helpers::title_span;

/// Rows used by one bordered field
const FIELD_ROWS: u16 = 3;

pub fn render_form_view(frame: &mut Frame, app: &App, form: &Form, area: Rect) {
    let theme = &app.theme;

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(std::iter::repeat_n(Constraint::Length(FIELD_ROWS), FIELD_COUNT));
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(title_span(form.header(), theme))), chunks[0]);

    for i in 0..FIELD_COUNT {
        let focused = i == form.focus;
        let field = chunks[i + 1];
        render_field(frame, theme, i, &form.fields[i], focused, field);
        if focused && !form.saving {
            place_cursor(frame, &form.fields[i], field);
        }
    }

    let mut footer: Vec<Line> = Vec::new();
    if let Some(error) = &form.error {
        footer.push(Line::from(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(theme.red).add_modifier(Modifier::BOLD),
        )));
    } else if form.saving {
        footer.push(Line::from(Span::styled(
            "Saving...",
            Style::default().fg(theme.dim),
        )));
    }
    frame.render_widget(Paragraph::new(footer), chunks[FIELD_COUNT + 1]);
}

fn render_field(
    frame: &mut Frame,
    theme: &Theme,
    index: usize,
    input: &TextInput,
    focused: bool,
    area: Rect,
) {
    let border = if focused {
        theme.highlight
    } else {
        theme.secondary
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            FIELD_LABELS[index],
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ));

    let content = if input.value().is_empty() {
        Span::styled(FIELD_PLACEHOLDERS[index], Style::default().fg(theme.dim))
    } else {
        Span::styled(input.value().to_string(), Style::default().fg(theme.text))
    };
    frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);
}

fn place_cursor(frame: &mut Frame, input: &TextInput, area: Rect) {
    let inner_width = area.width.saturating_sub(2);
    let col = (input.cursor_col() as u16).min(inner_width.saturating_sub(1));
    frame.set_cursor_position(Position::new(area.x + 1 + col, area.y + 1));
}
