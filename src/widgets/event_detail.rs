use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::theme;

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    let Some(ref event) = app.selected_event else {
        let empty = Paragraph::new(" No event selected").style(Style::default().fg(theme::TEXT_DIM));
        frame.render_widget(empty, area);
        return;
    };

    let categories = event.categories();
    let mut lines = vec![
        field_line("Date", &event.date),
        field_line("Categories", &categories),
        Line::from(""),
        Line::from(Span::styled(
            " Description:",
            Style::default().fg(theme::CYAN).add_modifier(Modifier::BOLD),
        )),
    ];
    for line in event.description.lines() {
        lines.push(Line::from(Span::styled(
            format!("   {}", line),
            Style::default().fg(theme::TEXT),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::AMBER))
        .title(format!(" {} ", event.date));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });

    // Scroll is counted in wrapped rows; stop once the last row is on screen.
    let rows = u16::try_from(paragraph.line_count(inner.width)).unwrap_or(u16::MAX);
    let max_scroll = rows.saturating_sub(inner.height);
    app.detail_scroll = app.detail_scroll.min(max_scroll);

    frame.render_widget(paragraph.scroll((app.detail_scroll, 0)), inner);
}

fn field_line<'a>(label: &str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!(" {:<12} ", label),
            Style::default().fg(theme::CYAN).add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(theme::TEXT)),
    ])
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::action::Action;
    use crate::domain::HistoricalEvent;

    fn rendered_text(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(app, frame, area)
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app_with_description(description: String) -> App {
        let mut app = App::new();
        app.update(Action::Refresh);
        app.update(Action::EventsLoaded(vec![HistoricalEvent {
            date: "1848-02-24".to_string(),
            description,
            category1: "politics".to_string(),
            category2: "france".to_string(),
        }]));
        app.update(Action::Select);
        app
    }

    #[test]
    fn bottom_of_long_wrapped_description_is_reachable() {
        let mut description = vec!["revolution"; 200].join(" ");
        description.push_str(" THE_END");
        let mut app = app_with_description(description);

        let top = rendered_text(&mut app, 40, 10);
        assert!(top.contains("Date"));
        assert!(!top.contains("THE_END"));

        app.update(Action::NavigateBottom);
        let bottom = rendered_text(&mut app, 40, 10);

        assert!(bottom.contains("THE_END"));
        assert!(app.detail_scroll > 4);
        assert!(app.detail_scroll < u16::MAX);
    }

    #[test]
    fn scrolling_up_after_bottom_moves_immediately() {
        let mut app = app_with_description(vec!["treaty"; 120].join(" "));
        app.update(Action::NavigateBottom);
        rendered_text(&mut app, 40, 10);
        let bottom = app.detail_scroll;

        app.update(Action::NavigateUp);
        rendered_text(&mut app, 40, 10);

        assert_eq!(app.detail_scroll, bottom - 1);
    }

    #[test]
    fn short_description_does_not_scroll() {
        let mut app = app_with_description("Short entry".to_string());
        app.update(Action::PageDown);
        let text = rendered_text(&mut app, 40, 10);

        assert_eq!(app.detail_scroll, 0);
        assert!(text.contains("Short entry"));
    }
}
