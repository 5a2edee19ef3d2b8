use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::View;
use crate::theme;

pub fn render(view: &View, frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from(""), section("Navigation")];
    lines.push(binding("j / k / Up / Down", "Navigate up/down"));
    lines.push(binding("gg / G", "Go to top / bottom"));
    lines.push(binding("Ctrl+D / Ctrl+U", "Page down / up"));
    match view {
        View::EventList => {
            lines.push(binding("Enter", "Show event details"));
            lines.push(Line::from(""));
            lines.push(section("Filter"));
            lines.push(binding("/ (slash)", "Filter by date as you type"));
            lines.push(binding("Enter", "Keep filter"));
            lines.push(binding("Esc", "Clear filter"));
        }
        View::EventDetail => {
            lines.push(binding("Esc / Backspace", "Back to list"));
        }
    }

    lines.push(Line::from(""));
    lines.push(section("General"));
    lines.push(binding("r / Ctrl+R", "Fetch events again"));
    lines.push(binding("?", "Toggle this help"));
    lines.push(binding("q / Ctrl+C", "Quit"));

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(4));
    let modal_area = centered_rect(60, height, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::AMBER))
        .title(" Help (? to close) ");

    frame.render_widget(Paragraph::new(lines).block(block), modal_area);
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default().fg(theme::AMBER).add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {:<22}", key), Style::default().fg(theme::YELLOW)),
        Span::styled(desc, Style::default().fg(theme::TEXT)),
    ])
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}
