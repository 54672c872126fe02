use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::tag_picker::TagPicker;
use crate::tui::theme::Theme;

use super::helpers::{checkbox_span, title_span};

fn row(label: &str, checked: bool, under_cursor: bool, theme: &Theme) -> Line<'static> {
    let indicator = if under_cursor {
        Span::styled("> ", Style::default().fg(theme.highlight))
    } else {
        Span::raw("  ")
    };
    Line::from(vec![
        indicator,
        checkbox_span(checked, theme),
        Span::raw(" "),
        Span::styled(label.to_string(), Style::default().fg(theme.text)),
    ])
}

pub fn render_tag_filter_view(frame: &mut Frame, app: &App, picker: &TagPicker, area: Rect) {
    let theme = &app.theme;
    let mut lines: Vec<Line> = vec![
        Line::from(title_span("Filter by Tag", theme)),
        Line::default(),
        row("All tags", picker.all_selected(), picker.cursor == 0, theme),
    ];

    match &picker.tags {
        None => lines.push(Line::from(Span::styled(
            "  Loading tags...",
            Style::default().fg(theme.dim),
        ))),
        Some(tags) => {
            for (i, tag) in tags.iter().enumerate() {
                lines.push(row(tag, picker.is_chosen(tag), picker.cursor == i + 1, theme));
            }
        }
    }

    // Scroll so the cursor row stays on screen
    let cursor_line = picker.cursor + 2;
    let height = area.height as usize;
    let scroll = if height > 0 && cursor_line >= height {
        cursor_line + 1 - height
    } else {
        0
    };

    let paragraph = Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}
