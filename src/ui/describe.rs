//! Describe View
//!
//! Read-only JSON view of the selected record.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let Some(json) = app.selected_item_json() else {
        return;
    };

    let title = app
        .current_resource()
        .map(|r| format!(" {} record ", r.display_name))
        .unwrap_or_else(|| " Record ".to_string());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(json)
        .block(block)
        .scroll((app.describe_scroll as u16, 0));

    f.render_widget(paragraph, area);
}
