use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let title = Span::styled(" annals", Style::default().fg(theme::AMBER));

    let status = if app.is_loading() {
        Span::styled("  ◌ fetching...", Style::default().fg(theme::YELLOW))
    } else if app.events.last_error().is_some() {
        Span::styled("  ✗ last fetch failed", Style::default().fg(theme::RED))
    } else if app.events.is_loaded() {
        Span::styled("  ● up to date", Style::default().fg(theme::GREEN))
    } else {
        Span::raw("")
    };

    let count = match app.events.all_events() {
        Some(all) => Span::styled(
            format!("  [{}/{} events]", app.events.visible_events().len(), all.len()),
            Style::default().fg(theme::TEXT_DIM),
        ),
        None => Span::raw(""),
    };

    let filter = if app.events.filter_query().trim().is_empty() {
        Span::raw("")
    } else {
        Span::styled(
            format!("  date~\"{}\"", app.events.filter_query()),
            Style::default().fg(theme::CYAN),
        )
    };

    let line = Line::from(vec![title, status, count, filter]);
    let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}
