//! Help Overlay
//!
//! Shows keyboard shortcuts and help information.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, _app: &App) {
    let area = f.area();
    let popup_area = centered_rect(70, 80, area);

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("  j/k, ↑/↓    ", Style::default().fg(Color::Yellow)),
            Span::raw("Move up/down"),
        ]),
        Line::from(vec![
            Span::styled("  gg          ", Style::default().fg(Color::Yellow)),
            Span::raw("Go to top"),
        ]),
        Line::from(vec![
            Span::styled("  G           ", Style::default().fg(Color::Yellow)),
            Span::raw("Go to bottom"),
        ]),
        Line::from(vec![
            Span::styled("  Ctrl+d/u    ", Style::default().fg(Color::Yellow)),
            Span::raw("Page down/up"),
        ]),
        Line::from(vec![
            Span::styled("  Tab         ", Style::default().fg(Color::Yellow)),
            Span::raw("Switch between categories and books"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Records",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("  n           ", Style::default().fg(Color::Yellow)),
            Span::raw("New record"),
        ]),
        Line::from(vec![
            Span::styled("  e           ", Style::default().fg(Color::Yellow)),
            Span::raw("Edit selected record"),
        ]),
        Line::from(vec![
            Span::styled("  Enter/v     ", Style::default().fg(Color::Yellow)),
            Span::raw("View selected record"),
        ]),
        Line::from(vec![
            Span::styled("  d/Delete    ", Style::default().fg(Color::Red)),
            Span::raw("Delete selected record (asks first)"),
        ]),
        Line::from(vec![
            Span::styled("  R           ", Style::default().fg(Color::Yellow)),
            Span::raw("Refresh current view"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Forms",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("  Tab/↑/↓     ", Style::default().fg(Color::Yellow)),
            Span::raw("Move between fields"),
        ]),
        Line::from(vec![
            Span::styled("  ←/→         ", Style::default().fg(Color::Yellow)),
            Span::raw("Cycle select options"),
        ]),
        Line::from(vec![
            Span::styled("  Enter       ", Style::default().fg(Color::Yellow)),
            Span::raw("Submit"),
        ]),
        Line::from(vec![
            Span::styled("  Esc         ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Other",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("  /           ", Style::default().fg(Color::Yellow)),
            Span::raw("Filter the table"),
        ]),
        Line::from(vec![
            Span::styled("  :           ", Style::default().fg(Color::Yellow)),
            Span::raw("Enter command mode"),
        ]),
        Line::from(vec![
            Span::styled("  N           ", Style::default().fg(Color::Yellow)),
            Span::raw("Notifications history"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ?/Esc       ", Style::default().fg(Color::Yellow)),
            Span::raw("Close help"),
        ]),
        Line::from(vec![
            Span::styled("  q           ", Style::default().fg(Color::Yellow)),
            Span::raw("Quit application"),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
