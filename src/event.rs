//! Event Handling
//!
//! Keyboard and event handling for tbib.

use crate::app::{App, Mode};
use crate::resource::FieldKind;
use anyhow::Result;
use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use std::time::Duration;

/// Handle events, returns true if app should quit
pub async fn handle_events(app: &mut App) -> Result<bool> {
    if poll(Duration::from_millis(100))? {
        if let Event::Key(key) = read()? {
            return handle_key_event(app, key.code, key.modifiers).await;
        }
    }
    Ok(false)
}

async fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
    // Global quit shortcut
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match app.mode {
        Mode::List => handle_list_mode(app, code, modifiers).await,
        Mode::Form => handle_form_mode(app, code, modifiers).await,
        Mode::Confirm => handle_confirm_mode(app, code).await,
        Mode::Warning => handle_warning_mode(app, code),
        Mode::Describe => handle_describe_mode(app, code),
        Mode::Command => handle_command_mode(app, code, modifiers).await,
        Mode::Help => handle_help_mode(app, code),
        Mode::Notifications => handle_notifications_mode(app, code),
    }
}

async fn handle_list_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
    // Double-g goes to top, vim style
    if code == KeyCode::Char('g') && !app.filter_active {
        if let Some((KeyCode::Char('g'), time)) = app.last_key_press {
            if time.elapsed() < Duration::from_millis(1000) {
                app.go_to_top();
                app.last_key_press = None;
                return Ok(false);
            }
        }
        app.last_key_press = Some((code, std::time::Instant::now()));
        return Ok(false);
    }
    app.last_key_press = None;

    // Handle filter input first
    if app.filter_active {
        match code {
            KeyCode::Esc => {
                app.clear_filter();
            }
            KeyCode::Enter => {
                app.filter_active = false;
            }
            KeyCode::Backspace => {
                app.filter_text.pop();
                app.apply_filter();
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                app.filter_text.push(c);
                app.apply_filter();
            }
            _ => {}
        }
        return Ok(false);
    }

    match code {
        // Quit
        KeyCode::Char('q') => return Ok(true),

        // Navigation - vim style + accessible alternatives
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.previous(),
        KeyCode::Home => app.go_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.go_to_bottom(),
        KeyCode::PageDown => app.page_down(10),
        KeyCode::PageUp => app.page_up(10),

        // Ctrl+D/U for page navigation
        KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.page_down(10);
        }
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.page_up(10);
        }

        // Quick jump to position 1-9
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c.to_digit(10).unwrap() as usize - 1;
            if idx < app.filtered_items.len() {
                app.selected = idx;
            }
        }

        // Refresh
        KeyCode::Char('R') => {
            app.refresh_current().await?;
        }

        // View the selected record
        KeyCode::Enter | KeyCode::Char('v') => {
            app.enter_describe_mode();
        }

        // Create / edit / delete
        KeyCode::Char('n') => {
            app.open_create_form().await;
        }
        KeyCode::Char('e') => {
            app.open_edit_form().await;
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            app.request_delete();
        }

        // Filter
        KeyCode::Char('/') => {
            app.filter_active = true;
        }

        // Command mode
        KeyCode::Char(':') => {
            app.enter_command_mode();
        }

        // Switch between the two collections
        KeyCode::Tab => {
            let next = if app.current_resource_key == "categorias" {
                "livros"
            } else {
                "categorias"
            };
            app.switch_resource(next).await?;
        }

        // Notifications history
        KeyCode::Char('N') => {
            app.enter_notifications_mode();
        }

        // Help
        KeyCode::Char('?') => {
            app.enter_help_mode();
        }

        _ => {}
    }

    Ok(false)
}

async fn handle_form_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
    match code {
        KeyCode::Esc => {
            app.cancel_form();
        }
        KeyCode::Enter => {
            app.submit_form().await?;
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.form.as_mut() {
                form.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.form.as_mut() {
                form.prev_field();
            }
        }
        KeyCode::Left => {
            if let Some(field) = app.form.as_mut().and_then(|f| f.focused_field_mut()) {
                if field.def.kind == FieldKind::Select {
                    field.prev_option();
                }
            }
        }
        KeyCode::Right => {
            if let Some(field) = app.form.as_mut().and_then(|f| f.focused_field_mut()) {
                if field.def.kind == FieldKind::Select {
                    field.next_option();
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = app.form.as_mut().and_then(|f| f.focused_field_mut()) {
                if field.def.kind != FieldKind::Select {
                    field.value.pop();
                }
            }
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(field) = app.form.as_mut().and_then(|f| f.focused_field_mut()) {
                match field.def.kind {
                    FieldKind::Text => field.value.push(c),
                    // Numeric inputs accept digits only, like a number
                    // input element
                    FieldKind::Number => {
                        if c.is_ascii_digit() {
                            field.value.push(c);
                        }
                    }
                    FieldKind::Select => {}
                }
            }
        }
        _ => {}
    }
    Ok(false)
}

async fn handle_confirm_mode(app: &mut App, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            app.decline_delete();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            if let Some(ref mut pending) = app.pending_delete {
                pending.selected_yes = true;
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if let Some(ref mut pending) = app.pending_delete {
                pending.selected_yes = false;
            }
        }
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.confirm_delete().await?;
        }
        KeyCode::Enter => {
            let confirmed = app
                .pending_delete
                .as_ref()
                .map(|p| p.selected_yes)
                .unwrap_or(false);
            if confirmed {
                app.confirm_delete().await?;
            } else {
                app.decline_delete();
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_warning_mode(app: &mut App, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Esc | KeyCode::Enter => {
            app.warning_message = None;
            app.exit_mode();
        }
        _ => {}
    }
    Ok(false)
}

fn handle_describe_mode(app: &mut App, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('v') | KeyCode::Backspace => {
            app.exit_mode();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.describe_scroll = app.describe_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.describe_scroll = app.describe_scroll.saturating_sub(1);
        }
        KeyCode::PageDown => {
            app.describe_scroll = app.describe_scroll.saturating_add(10);
        }
        KeyCode::PageUp => {
            app.describe_scroll = app.describe_scroll.saturating_sub(10);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.describe_scroll = 0;
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.describe_scroll = app.describe_line_count().saturating_sub(1);
        }
        _ => {}
    }
    Ok(false)
}

async fn handle_command_mode(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Result<bool> {
    match code {
        KeyCode::Esc => {
            app.exit_mode();
        }
        KeyCode::Enter => {
            let should_quit = app.execute_command().await?;
            if app.mode == Mode::Command {
                app.exit_mode();
            }
            return Ok(should_quit);
        }
        KeyCode::Backspace => {
            app.command_text.pop();
            app.update_command_suggestions();
        }
        KeyCode::Tab | KeyCode::Right => {
            app.apply_suggestion();
        }
        KeyCode::Down => {
            app.next_suggestion();
        }
        KeyCode::Up => {
            app.prev_suggestion();
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_text.push(c);
            app.update_command_suggestions();
        }
        _ => {}
    }
    Ok(false)
}

fn handle_help_mode(app: &mut App, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            app.exit_mode();
        }
        _ => {}
    }
    Ok(false)
}

fn handle_notifications_mode(app: &mut App, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('N') => {
            app.exit_mode();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let total = app.notification_manager.notifications.len();
            if total > 0 {
                app.notifications_selected = (app.notifications_selected + 1).min(total - 1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.notifications_selected = app.notifications_selected.saturating_sub(1);
        }
        KeyCode::Char('c') => {
            app.notification_manager.clear();
            app.notifications_selected = 0;
        }
        _ => {}
    }
    Ok(false)
}
