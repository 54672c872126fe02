use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::model::{DueLabel, Task};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::time::format_stamp;

use super::helpers::{due_style, priority_style, tag_span, title_span};

/// Width of the label column
const LABEL_WIDTH: usize = 12;

fn label_span(label: &str, theme: &Theme) -> Span<'static> {
    Span::styled(
        format!("{:<width$}", label, width = LABEL_WIDTH),
        Style::default().fg(theme.secondary),
    )
}

fn field_line(label: &str, value: Span<'static>, theme: &Theme) -> Line<'static> {
    Line::from(vec![label_span(label, theme), value])
}

/// Due timestamp plus its annotation
pub fn due_detail(task: &Task, now: DateTime<Local>) -> Option<(DueLabel, String)> {
    let due = task.due?;
    let label = task.due_label(now)?;
    let stamp = format_stamp(due);
    let text = match label {
        DueLabel::Overdue => format!("{} (OVERDUE)", stamp),
        DueLabel::Today => format!("{} (today)", stamp),
        DueLabel::Tomorrow => format!("{} (tomorrow)", stamp),
        DueLabel::Plain => stamp,
    };
    Some((label, text))
}

pub fn render_detail_view(
    frame: &mut Frame,
    app: &App,
    task: &Task,
    area: Rect,
    now: DateTime<Local>,
) {
    let theme = &app.theme;
    let value = |text: String| Span::styled(text, Style::default().fg(theme.text));
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(title_span(&format!("Todo #{}", task.id), theme)));
    lines.push(Line::default());

    lines.push(field_line("Title:", value(task.title.clone()), theme));
    if !task.description.is_empty() {
        lines.push(field_line(
            "Description:",
            value(task.description.clone()),
            theme,
        ));
    }

    let status = if task.completed {
        Span::styled("Completed", Style::default().fg(theme.green))
    } else {
        value("Pending".to_string())
    };
    lines.push(field_line("Status:", status, theme));

    if task.priority > 0 {
        lines.push(field_line(
            "Priority:",
            Span::styled(
                format!("{} ({})", task.priority, task.priority_label()),
                priority_style(task.priority, theme),
            ),
            theme,
        ));
    }

    if !task.tags.is_empty() {
        let mut spans = vec![label_span("Tags:", theme)];
        for tag in &task.tags {
            spans.push(tag_span(tag, theme));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    if let Some((label, text)) = due_detail(task, now) {
        lines.push(field_line(
            "Due:",
            Span::styled(text, due_style(label, theme)),
            theme,
        ));
    }

    lines.push(Line::default());
    lines.push(field_line("Created:", value(format_stamp(task.created_at)), theme));
    lines.push(field_line("Updated:", value(format_stamp(task.updated_at)), theme));
    if let Some(completed_at) = task.completed_at {
        lines.push(field_line("Completed:", value(format_stamp(completed_at)), theme));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Config;
    use crate::tui::render::test_helpers::*;
    use chrono::{TimeZone, Utc};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn render(task: &Task) -> String {
        let app = App::new(&Config::default());
        render_to_string(TERM_W, 16, |frame, area| {
            render_detail_view(frame, &app, task, area, now())
        })
    }

    #[test]
    fn minimal_task_shows_required_fields_only() {
        let mut task = Task::new("Buy milk");
        task.id = 3;
        let output = render(&task);
        assert!(output.starts_with(" Todo #3"));
        assert!(output.contains("Title:      Buy milk"));
        assert!(output.contains("Status:     Pending"));
        assert!(output.contains("Created:"));
        assert!(!output.contains("Description:"));
        assert!(!output.contains("Priority:"));
        assert!(!output.contains("Tags:"));
        assert!(!output.contains("Due:"));
        assert!(!output.contains("Completed:"));
    }

    #[test]
    fn populated_task_shows_everything() {
        let mut task = Task::new("Report");
        task.id = 9;
        task.description = "Quarterly numbers".into();
        task.priority = 2;
        task.tags = vec!["#work".into(), "#q3".into()];
        task.due = Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap());
        task.set_completed(true, Utc.with_ymd_and_hms(2026, 3, 9, 8, 0, 0).unwrap());

        let output = render(&task);
        assert!(output.contains("Description:Quarterly numbers"));
        assert!(output.contains("Status:     Completed"));
        assert!(output.contains("Priority:   2 (High)"));
        assert!(output.contains("Tags:        #work   #q3"));
        assert!(output.contains("Completed:"));
        // completed tasks are never overdue
        assert!(!output.contains("OVERDUE"));
    }

    #[test]
    fn due_annotations() {
        let mut task = Task::new("x");
        task.due = Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap());
        let (label, text) = due_detail(&task, now()).unwrap();
        assert_eq!(label, DueLabel::Overdue);
        assert!(text.ends_with(" (OVERDUE)"));
        assert!(text.starts_with("2026-03-0"));

        task.due = Some(now().with_timezone(&Utc) + chrono::TimeDelta::hours(2));
        assert!(due_detail(&task, now()).unwrap().1.ends_with(" (today)"));
        task.due = Some(now().with_timezone(&Utc) + chrono::TimeDelta::hours(24));
        assert!(due_detail(&task, now()).unwrap().1.ends_with(" (tomorrow)"));
        task.due = Some(now().with_timezone(&Utc) + chrono::TimeDelta::days(5));
        let (label, text) = due_detail(&task, now()).unwrap();
        assert_eq!(label, DueLabel::Plain);
        assert_eq!(text.len(), "2026-03-15 12:00".len());
    }
}
