use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, InputMode, View};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.input_mode {
        InputMode::Search => vec![("Esc", "clear"), ("Enter", "keep filter")],
        InputMode::PendingG => vec![("g", "top")],
        InputMode::Normal => match app.view {
            View::EventList => vec![
                ("j/k", "nav"),
                ("Enter", "details"),
                ("/", "filter by date"),
                ("r", "refresh"),
                ("?", "help"),
                ("q", "quit"),
            ],
            View::EventDetail => vec![("j/k", "scroll"), ("Esc", "back"), ("?", "help")],
        },
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(theme::AMBER)));
        spans.push(Span::styled(
            format!(":{}", desc),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_SURFACE));
    frame.render_widget(widget, area);
}
