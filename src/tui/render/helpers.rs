use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::model::{DueLabel, Task};
use crate::tui::theme::Theme;
use crate::util::unicode;

pub(super) const CHECKED: &str = "[✓]";
pub(super) const UNCHECKED: &str = "[ ]";

/// Bold label on the highlight color, padded by one cell each side
pub(super) fn title_span(text: &str, theme: &Theme) -> Span<'static> {
    Span::styled(
        format!(" {} ", text),
        Style::default()
            .fg(theme.text_bright)
            .bg(theme.highlight)
            .add_modifier(Modifier::BOLD),
    )
}

pub(super) fn checkbox_span(checked: bool, theme: &Theme) -> Span<'static> {
    if checked {
        Span::styled(CHECKED, Style::default().fg(theme.green))
    } else {
        Span::styled(UNCHECKED, Style::default().fg(theme.secondary))
    }
}

pub(super) fn tag_span(tag: &str, theme: &Theme) -> Span<'static> {
    Span::styled(
        format!(" {} ", tag),
        Style::default().fg(theme.tag_color(tag)).bg(theme.tag_bg),
    )
}

/// Style for a due annotation of the given kind
pub(super) fn due_style(label: DueLabel, theme: &Theme) -> Style {
    match label {
        DueLabel::Overdue => Style::default().fg(theme.red).add_modifier(Modifier::BOLD),
        DueLabel::Today => Style::default()
            .fg(theme.orange)
            .add_modifier(Modifier::BOLD),
        DueLabel::Tomorrow | DueLabel::Plain => Style::default().fg(theme.text),
    }
}

/// Priority glyph, or a blank cell when unset
pub(super) fn priority_span(task: &Task, theme: &Theme) -> Span<'static> {
    match theme.priority_color(task.priority) {
        Some(color) => {
            let mut style = Style::default().fg(color);
            if task.priority <= 2 {
                style = style.add_modifier(Modifier::BOLD);
            }
            Span::styled("●", style)
        }
        None => Span::raw(" "),
    }
}

/// Style used for the priority value in the detail view
pub(super) fn priority_style(priority: u8, theme: &Theme) -> Style {
    let style = Style::default().fg(theme.priority_color(priority).unwrap_or(theme.text));
    if priority <= 2 {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}
