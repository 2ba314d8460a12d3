//! Terminal User Interface rendering module
//!
//! This module handles all UI rendering for tbib using the ratatui
//! framework. The list view binds the current collection to a table, one
//! row per record in server order; the form view binds a record to labeled
//! inputs. All state comes in through [`App`]; render functions hold none
//! of their own.
//!
//! # Architecture
//!
//! - `header` - Header bar with backend/collection info
//! - `form` - Create/edit form view
//! - `dialog` - Confirmation and warning dialogs
//! - `describe` - Read-only JSON view of one record
//! - `command_box` - Command mode input (`:` key)
//! - `help` - Help overlay showing keybindings
//! - `notifications` - Notifications history panel

mod command_box;
mod describe;
mod dialog;
mod form;
mod header;
mod help;
mod notifications;

use crate::app::{App, Mode};
use crate::resource::{extract_json_value, ResourceDef};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use serde_json::Value;

pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Header (multi-line)
            Constraint::Min(1),    // Main content (table, form or describe)
            Constraint::Length(1), // Footer/crumb
        ])
        .split(f.area());

    header::render(f, app, chunks[0]);

    match app.mode {
        Mode::Form => {
            form::render(f, app, chunks[1]);
        }
        Mode::Describe => {
            describe::render(f, app, chunks[1]);
        }
        _ => {
            render_main_content(f, app, chunks[1]);
        }
    }

    render_crumb(f, app, chunks[2]);

    // Overlays
    match app.mode {
        Mode::Help => {
            help::render(f, app);
        }
        Mode::Confirm | Mode::Warning => {
            dialog::render(f, app);
        }
        Mode::Command => {
            command_box::render(f, app);
        }
        Mode::Notifications => {
            notifications::render(f, app);
        }
        _ => {}
    }
}

/// Bind one record to its table row: one cell per column definition
pub fn build_row_cells(def: &ResourceDef, item: &Value) -> Vec<String> {
    def.columns
        .iter()
        .map(|col| extract_json_value(item, &col.json_path))
        .collect()
}

fn render_main_content(f: &mut Frame, app: &mut App, area: Rect) {
    // If filter is active or has text, show filter input above table
    let show_filter = app.filter_active || !app.filter_text.is_empty();

    if show_filter {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        render_filter_bar(f, app, chunks[0]);
        render_table(f, app, chunks[1]);
    } else {
        render_table(f, app, area);
    }
}

fn render_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let cursor_style = if app.filter_active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let filter_display = if app.filter_active {
        format!("/{}_", app.filter_text)
    } else {
        format!("/{}", app.filter_text)
    };

    let paragraph = Paragraph::new(Line::from(vec![Span::styled(filter_display, cursor_style)]));
    f.render_widget(paragraph, area);
}

/// Render the collection table from the current resource definition.
/// Rows are rebuilt from the collection every frame, so a re-fetch can
/// never leave stale or duplicate rows behind.
fn render_table(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(resource) = app.current_resource() else {
        let msg = Paragraph::new("Unknown resource").style(Style::default().fg(Color::Red));
        f.render_widget(msg, area);
        return;
    };

    let title = {
        let count = app.filtered_items.len();
        let total = app.items.len();
        if app.filter_text.is_empty() {
            format!(" {}[{}] ", resource.display_name, count)
        } else {
            format!(" {}[{}/{}] ", resource.display_name, count, total)
        }
    };

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

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    if app.filtered_items.is_empty() {
        let text = if app.loading {
            "Loading..."
        } else {
            "No records. n: new  R: refresh"
        };
        let msg = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(msg, inner_area);
        return;
    }

    // Account for the header row
    let visible_height = (inner_area.height as usize).saturating_sub(1);
    app.update_viewport(visible_height);
    app.ensure_visible();
    let range = app.visible_range();

    let header_cells: Vec<Cell> = resource
        .columns
        .iter()
        .map(|col| {
            Cell::from(format!(" {}", col.header)).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    let header = Row::new(header_cells).height(1);

    // Build only visible rows
    let rows: Vec<Row> = app.filtered_items[range.clone()]
        .iter()
        .map(|item| {
            let cells = build_row_cells(resource, item)
                .into_iter()
                .map(|value| Cell::from(format!(" {}", truncate_string(&value, 38))));
            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = resource
        .columns
        .iter()
        .map(|col| Constraint::Percentage(col.width))
        .collect();

    let table = Table::new(rows, widths).header(header).row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = TableState::default();
    if app.selected >= range.start && app.selected < range.end {
        state.select(Some(app.selected - range.start));
    }

    f.render_stateful_widget(table, inner_area, &mut state);
}

/// Truncate string for display
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

fn render_crumb(f: &mut Frame, app: &App, area: Rect) {
    let crumb_display = format!(
        "{} > {}",
        app.client.base_url(),
        app.current_resource_key
    );

    let toast_text = app
        .notification_manager
        .current_toast()
        .map(|notif| notif.toast_message());

    let notification_indicator = if app.notification_manager.has_notifications() {
        " [N]".to_string()
    } else {
        String::new()
    };

    let status_text = if let Some(err) = &app.error_message {
        format!("Error: {}", err)
    } else if let Some(ref toast) = toast_text {
        toast.clone()
    } else if app.loading {
        "Loading...".to_string()
    } else {
        match app.mode {
            Mode::Describe => "j/k: scroll | q/v/Esc: back".to_string(),
            Mode::Form => "Tab: next field | Enter: submit | Esc: cancel".to_string(),
            _ if app.filter_active => "Type to filter | Enter: apply | Esc: clear".to_string(),
            _ => "n:new e:edit d:delete v:view R:refresh Tab:switch".to_string(),
        }
    };

    let style = if app.error_message.is_some() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if toast_text.is_some() {
        if let Some(notif) = app.notification_manager.current_toast() {
            match &notif.status {
                crate::notification::NotificationStatus::Success => {
                    Style::default().fg(Color::Green)
                }
                crate::notification::NotificationStatus::Error(_) => {
                    Style::default().fg(Color::Red)
                }
                _ => Style::default().fg(Color::Yellow),
            }
        } else {
            Style::default().fg(Color::Cyan)
        }
    } else if app.loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let crumb = Line::from(vec![
        Span::styled(
            format!("<{}>", crumb_display),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(status_text, style),
        Span::styled(notification_indicator, Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph = Paragraph::new(crumb);
    f.render_widget(paragraph, area);
}
