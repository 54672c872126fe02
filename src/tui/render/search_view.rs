use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::tui::app::App;
use crate::tui::text_input::TextInput;

use super::helpers::title_span;

/// Width of the search box including borders
const BOX_WIDTH: u16 = 34;

pub fn render_search_view(frame: &mut Frame, app: &App, input: &TextInput, area: Rect) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(title_span("Search Todos", theme))),
        chunks[0],
    );

    let box_area = Rect {
        width: chunks[1].width.min(BOX_WIDTH),
        ..chunks[1]
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.highlight));
    let content = if input.value().is_empty() {
        Span::styled("Search...", Style::default().fg(theme.dim))
    } else {
        Span::styled(input.value().to_string(), Style::default().fg(theme.text))
    };
    frame.render_widget(Paragraph::new(Line::from(content)).block(block), box_area);

    // Keep the cursor inside the box
    let inner = box_area.width.saturating_sub(2);
    let col = (input.cursor_col() as u16).min(inner.saturating_sub(1));
    frame.set_cursor_position(Position::new(box_area.x + 1 + col, box_area.y + 1));
}
