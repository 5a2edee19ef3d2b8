use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, InputMode};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    if app.input_mode != InputMode::Search {
        return;
    }

    let line = Line::from(vec![
        Span::styled(" date/", Style::default().fg(theme::GREEN)),
        Span::styled(app.input_buffer.as_str(), Style::default().fg(theme::TEXT)),
        Span::styled("_", Style::default().fg(theme::TEXT_MUTED)),
    ]);

    let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_SURFACE));
    frame.render_widget(widget, area);
}
