//! Form View
//!
//! Renders the create/edit form: one labeled input per field definition,
//! with the focused input highlighted. Select fields cycle through their
//! loaded options with Left/Right.

use crate::app::{App, FormKind};
use crate::resource::FieldKind;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };

    let resource_name = app
        .current_resource()
        .map(|r| r.display_name.as_str())
        .unwrap_or("?");

    let title = match &form.kind {
        FormKind::Create => format!(" New - {} ", resource_name),
        FormKind::Edit { id } => format!(" Edit - {} [{}] ", resource_name, id),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    f.render_widget(block, area);

    // One row of breathing space, then two lines per field
    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(form.fields.iter().map(|_| Constraint::Length(2)));
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focused;

        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let value_style = if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let value_display = match field.def.kind {
            FieldKind::Select => {
                if focused {
                    format!("< {} >", field.display_value())
                } else {
                    field.display_value()
                }
            }
            _ => {
                if focused {
                    format!("{}_", field.value)
                } else {
                    field.value.clone()
                }
            }
        };

        let line = Line::from(vec![
            Span::styled(format!(" {:>18}: ", field.def.label), label_style),
            Span::styled(value_display, value_style),
        ]);

        f.render_widget(Paragraph::new(line), rows[i + 1]);
    }
}
