use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::App;
use crate::theme;

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    if app.events.visible_events().is_empty() {
        let label = if !app.events.is_loaded() {
            if app.is_loading() {
                " Loading events..."
            } else {
                " No events loaded"
            }
        } else if app.events.filter_query().trim().is_empty() {
            " No events"
        } else {
            " No events match the filter"
        };
        let empty = Paragraph::new(label).style(Style::default().fg(theme::TEXT_DIM));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from(" Date"),
        Cell::from("Description"),
        Cell::from("Categories"),
    ])
    .style(Style::default().fg(theme::CYAN).add_modifier(Modifier::BOLD))
    .height(1);

    let rows: Vec<Row> = app
        .events
        .visible_events()
        .iter()
        .map(|event| {
            Row::new(vec![
                Cell::from(format!(" {}", event.date)).style(Style::default().fg(theme::AMBER)),
                Cell::from(event.description.clone()),
                Cell::from(event.categories()).style(Style::default().fg(theme::TEXT_DIM)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(16),
        Constraint::Percentage(65),
        Constraint::Percentage(25),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::NONE))
        .style(Style::default().fg(theme::TEXT))
        .row_highlight_style(
            Style::default()
                .bg(theme::BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
}
