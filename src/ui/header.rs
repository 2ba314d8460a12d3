//! Header Component
//!
//! Displays backend, collection, and key hint information.

use crate::app::App;
use crate::VERSION;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" tbib v{} ", VERSION),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    // Row 1: Backend URL
    let backend_line = Line::from(vec![
        Span::styled(" Backend: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.client.base_url(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(backend_line), rows[0]);

    // Row 2: Current collection and count
    let resource_line = if let Some(resource) = app.current_resource() {
        Line::from(vec![
            Span::styled(" Collection: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                &resource.display_name,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled("Count: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", app.filtered_items.len()),
                Style::default().fg(Color::White),
            ),
            if app.items.len() != app.filtered_items.len() {
                Span::styled(
                    format!(" (filtered from {})", app.items.len()),
                    Style::default().fg(Color::DarkGray),
                )
            } else {
                Span::raw("")
            },
        ])
    } else {
        Line::from(vec![Span::styled(
            " No collection selected",
            Style::default().fg(Color::Red),
        )])
    };
    f.render_widget(Paragraph::new(resource_line), rows[1]);

    // Row 3: Help hint
    let help_line = Line::from(vec![
        Span::styled(
            " ?:help  ::cmd  /:filter  N:notifications  q:quit",
            Style::default().fg(Color::DarkGray),
        ),
        if app.readonly {
            Span::styled(
                "  [READ-ONLY]",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("")
        },
    ]);
    f.render_widget(Paragraph::new(help_line), rows[2]);
}
