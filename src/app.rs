//! Application State
//!
//! Central application state management for tbib. All view state lives
//! here and is handed to the render functions; the UI never reaches into
//! globals.

use crate::api::client::ApiClient;
use crate::api::http::format_api_error;
use crate::config::Config;
use crate::notification::{NotificationManager, OperationType};
use crate::resource::{
    client::{
        create_record, delete_record, fetch_record, fetch_select_options, list_records,
        record_id, update_record,
    },
    extract_json_value, get_all_resource_keys, get_resource, FieldDef, FieldKind, ResourceDef,
    SelectOption,
};
use anyhow::Result;
use crossterm::event::KeyCode;
use serde_json::{Map, Value};
use std::ops::Range;
use uuid::Uuid;

/// Default viewport height (updated during render based on terminal size)
const DEFAULT_VIEWPORT_HEIGHT: usize = 20;

/// Application modes
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    List,          // Viewing the collection table
    Form,          // Create or edit form
    Confirm,       // Delete confirmation dialog
    Warning,       // Warning/info dialog (OK only)
    Describe,      // Viewing JSON details of selected record
    Command,       // : command input
    Help,          // ? help popup
    Notifications, // Notifications history panel
}

/// Whether a form creates a new record or edits an existing one
#[derive(Debug, Clone, PartialEq)]
pub enum FormKind {
    Create,
    Edit { id: String },
}

/// One input of a form, bound to a field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub def: FieldDef,
    /// Text buffer for text/number fields
    pub value: String,
    /// Loaded options for select fields
    pub options: Vec<SelectOption>,
    pub selected_option: usize,
}

impl FormField {
    fn new(def: &FieldDef) -> Self {
        Self {
            def: def.clone(),
            value: String::new(),
            options: Vec::new(),
            selected_option: 0,
        }
    }

    /// The value this field would submit
    pub fn submit_value(&self) -> Value {
        match self.def.kind {
            FieldKind::Text => Value::String(self.value.clone()),
            // Numeric inputs submit as numbers when they parse; the raw
            // text otherwise
            FieldKind::Number => match self.value.parse::<i64>() {
                Ok(n) => Value::Number(n.into()),
                Err(_) => Value::String(self.value.clone()),
            },
            FieldKind::Select => Value::String(
                self.options
                    .get(self.selected_option)
                    .map(|o| o.value.clone())
                    .unwrap_or_default(),
            ),
        }
    }

    /// Visible value for rendering
    pub fn display_value(&self) -> String {
        match self.def.kind {
            FieldKind::Select => self
                .options
                .get(self.selected_option)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| "(no options)".to_string()),
            _ => self.value.clone(),
        }
    }

    pub fn next_option(&mut self) {
        if !self.options.is_empty() {
            self.selected_option = (self.selected_option + 1) % self.options.len();
        }
    }

    pub fn prev_option(&mut self) {
        if !self.options.is_empty() {
            if self.selected_option == 0 {
                self.selected_option = self.options.len() - 1;
            } else {
                self.selected_option -= 1;
            }
        }
    }
}

/// State of the create/edit form
#[derive(Debug, Clone)]
pub struct FormState {
    pub resource_key: String,
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focused: usize,
}

impl FormState {
    fn new_create(resource_key: &str, def: &ResourceDef) -> Self {
        Self {
            resource_key: resource_key.to_string(),
            kind: FormKind::Create,
            fields: def.form_fields.iter().map(FormField::new).collect(),
            focused: 0,
        }
    }

    /// Build an edit form; fields are prefilled from `record` when the
    /// preload succeeded and left empty otherwise
    fn new_edit(resource_key: &str, def: &ResourceDef, id: &str, record: Option<&Value>) -> Self {
        let mut fields: Vec<FormField> = def.fields_for_edit().map(FormField::new).collect();

        if let Some(record) = record {
            for field in &mut fields {
                if let Some(value) = record.get(&field.def.name) {
                    field.value = match value {
                        Value::String(s) => s.clone(),
                        Value::Number(n) => n.to_string(),
                        _ => String::new(),
                    };
                }
            }
        }

        Self {
            resource_key: resource_key.to_string(),
            kind: FormKind::Edit { id: id.to_string() },
            fields,
            focused: 0,
        }
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focused)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            if self.focused == 0 {
                self.focused = self.fields.len() - 1;
            } else {
                self.focused -= 1;
            }
        }
    }

    /// Serialize the form into the request body: one key per form field
    pub fn to_body(&self) -> Value {
        let mut map = Map::new();
        for field in &self.fields {
            map.insert(field.def.name.clone(), field.submit_value());
        }
        Value::Object(map)
    }

    /// Value of the resource's identifying field, for acknowledgments
    pub fn name_value(&self, def: &ResourceDef) -> String {
        self.fields
            .iter()
            .find(|f| f.def.name == def.name_field)
            .map(|f| f.display_value())
            .unwrap_or_default()
    }
}

/// Pending delete that requires confirmation
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub resource_key: String,
    pub id: String,
    pub label: String,
    pub message: String,
    pub selected_yes: bool,
}

/// Main application state
pub struct App {
    // Backend client
    pub client: ApiClient,

    // Current collection being viewed
    pub current_resource_key: String,

    // Dynamic data storage (JSON)
    pub items: Vec<Value>,
    pub filtered_items: Vec<Value>,

    // Navigation state
    pub selected: usize,
    pub mode: Mode,
    pub filter_text: String,
    pub filter_active: bool,

    // Command input
    pub command_text: String,
    pub command_suggestions: Vec<String>,
    pub command_suggestion_selected: usize,

    // Form state
    pub form: Option<FormState>,

    // Confirmation
    pub pending_delete: Option<PendingDelete>,

    // UI state
    pub loading: bool,
    pub error_message: Option<String>,
    pub warning_message: Option<String>,
    pub describe_scroll: usize,

    // Persistent configuration
    pub config: Config,

    // Read-only mode
    pub readonly: bool,

    // Notifications
    pub notification_manager: NotificationManager,
    pub notifications_selected: usize,

    // Virtual scrolling
    pub viewport_height: usize,
    pub scroll_offset: usize,

    // Key press tracking (double-g)
    pub last_key_press: Option<(KeyCode, std::time::Instant)>,
}

impl App {
    /// Create App from pre-initialized components
    pub fn from_initialized(
        client: ApiClient,
        resource_key: String,
        initial_items: Vec<Value>,
        config: Config,
        readonly: bool,
    ) -> Self {
        let filtered_items = initial_items.clone();

        let mut notification_manager = NotificationManager::new();
        notification_manager.max_history = config.notifications.max_history;
        notification_manager.toast_duration =
            std::time::Duration::from_secs(config.notifications.toast_duration_secs);

        Self {
            client,
            current_resource_key: resource_key,
            items: initial_items,
            filtered_items,
            selected: 0,
            mode: Mode::List,
            filter_text: String::new(),
            filter_active: false,
            command_text: String::new(),
            command_suggestions: Vec::new(),
            command_suggestion_selected: 0,
            form: None,
            pending_delete: None,
            loading: false,
            error_message: None,
            warning_message: None,
            describe_scroll: 0,
            config,
            readonly,
            notification_manager,
            notifications_selected: 0,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            scroll_offset: 0,
            last_key_press: None,
        }
    }

    // =========================================================================
    // Resource Definition Access
    // =========================================================================

    pub fn current_resource(&self) -> Option<&'static ResourceDef> {
        get_resource(&self.current_resource_key)
    }

    pub fn get_available_commands(&self) -> Vec<String> {
        let mut commands: Vec<String> = get_all_resource_keys()
            .iter()
            .map(|s| s.to_string())
            .collect();

        commands.push("notifications".to_string());
        commands.push("notifications clear".to_string());
        commands.push("refresh".to_string());
        commands.push("quit".to_string());

        commands.sort();
        commands
    }

    // =========================================================================
    // Data Fetching
    // =========================================================================

    /// Re-fetch the current collection and rebuild the view from it. The
    /// previous rows are always discarded, so repeated invocations can
    /// never duplicate rows.
    pub async fn refresh_current(&mut self) -> Result<()> {
        let Some(def) = self.current_resource() else {
            self.error_message = Some(format!("Unknown resource: {}", self.current_resource_key));
            return Ok(());
        };

        self.loading = true;
        self.error_message = None;

        match list_records(&self.client, def).await {
            Ok(items) => {
                let prev_selected = self.selected;
                self.items = items;
                self.apply_filter();

                if prev_selected < self.filtered_items.len() {
                    self.selected = prev_selected;
                } else {
                    self.selected = 0;
                }
            }
            Err(e) => {
                self.error_message = Some(format_api_error(&e));
                self.items.clear();
                self.filtered_items.clear();
                self.selected = 0;
            }
        }

        self.loading = false;
        Ok(())
    }

    /// Switch to another collection and fetch it
    pub async fn switch_resource(&mut self, key: &str) -> Result<()> {
        if get_resource(key).is_none() {
            self.error_message = Some(format!("Unknown resource: {}", key));
            return Ok(());
        }

        self.current_resource_key = key.to_string();
        self.clear_filter();
        self.selected = 0;
        self.scroll_offset = 0;

        if let Err(e) = self.config.set_last_resource(key) {
            tracing::warn!("Failed to persist last resource: {}", e);
        }

        self.refresh_current().await
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Case-insensitive substring match across all columns; relative order
    /// of the server response is preserved.
    pub fn apply_filter(&mut self) {
        let filter = self.filter_text.to_lowercase();

        if filter.is_empty() {
            self.filtered_items = self.items.clone();
        } else {
            let resource = self.current_resource();
            self.filtered_items = self
                .items
                .iter()
                .filter(|item| {
                    if let Some(res) = resource {
                        res.columns.iter().any(|col| {
                            let value = extract_json_value(item, &col.json_path).to_lowercase();
                            value.contains(&filter)
                        })
                    } else {
                        item.to_string().to_lowercase().contains(&filter)
                    }
                })
                .cloned()
                .collect();
        }

        if self.selected >= self.filtered_items.len() && !self.filtered_items.is_empty() {
            self.selected = self.filtered_items.len() - 1;
        }
        self.scroll_offset = 0;
    }

    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
        self.apply_filter();
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn selected_item(&self) -> Option<&Value> {
        self.filtered_items.get(self.selected)
    }

    pub fn selected_item_json(&self) -> Option<String> {
        self.selected_item()
            .map(|item| serde_json::to_string_pretty(item).unwrap_or_default())
    }

    pub fn describe_line_count(&self) -> usize {
        self.selected_item_json()
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }

    pub fn next(&mut self) {
        if !self.filtered_items.is_empty() {
            self.selected = (self.selected + 1).min(self.filtered_items.len() - 1);
        }
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn go_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn go_to_bottom(&mut self) {
        if !self.filtered_items.is_empty() {
            self.selected = self.filtered_items.len() - 1;
        }
    }

    pub fn page_down(&mut self, page_size: usize) {
        if !self.filtered_items.is_empty() {
            self.selected = (self.selected + page_size).min(self.filtered_items.len() - 1);
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
    }

    // =========================================================================
    // Virtual scrolling
    // =========================================================================

    pub fn update_viewport(&mut self, height: usize) {
        self.viewport_height = height.max(1);
    }

    /// Keep the selected row inside the visible window
    pub fn ensure_visible(&mut self) {
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = self.selected + 1 - self.viewport_height;
        }
    }

    pub fn visible_range(&self) -> Range<usize> {
        let start = self.scroll_offset.min(self.filtered_items.len());
        let end = (self.scroll_offset + self.viewport_height).min(self.filtered_items.len());
        start..end
    }

    // =========================================================================
    // Mode Transitions
    // =========================================================================

    pub fn exit_mode(&mut self) {
        self.mode = Mode::List;
    }

    pub fn enter_help_mode(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn enter_describe_mode(&mut self) {
        if self.selected_item().is_some() {
            self.describe_scroll = 0;
            self.mode = Mode::Describe;
        }
    }

    pub fn enter_notifications_mode(&mut self) {
        self.notifications_selected = 0;
        self.mode = Mode::Notifications;
    }

    pub fn show_warning(&mut self, message: &str) {
        self.warning_message = Some(message.to_string());
        self.mode = Mode::Warning;
    }

    pub fn enter_command_mode(&mut self) {
        self.mode = Mode::Command;
        self.command_text.clear();
        self.command_suggestions = self.get_available_commands();
        self.command_suggestion_selected = 0;
    }

    pub fn update_command_suggestions(&mut self) {
        let input = self.command_text.to_lowercase();
        let all_commands = self.get_available_commands();

        if input.is_empty() {
            self.command_suggestions = all_commands;
        } else {
            self.command_suggestions = all_commands
                .into_iter()
                .filter(|cmd| cmd.contains(&input))
                .collect();
        }

        if self.command_suggestion_selected >= self.command_suggestions.len() {
            self.command_suggestion_selected = 0;
        }
    }

    pub fn next_suggestion(&mut self) {
        if !self.command_suggestions.is_empty() {
            self.command_suggestion_selected =
                (self.command_suggestion_selected + 1) % self.command_suggestions.len();
        }
    }

    pub fn prev_suggestion(&mut self) {
        if !self.command_suggestions.is_empty() {
            if self.command_suggestion_selected == 0 {
                self.command_suggestion_selected = self.command_suggestions.len() - 1;
            } else {
                self.command_suggestion_selected -= 1;
            }
        }
    }

    pub fn apply_suggestion(&mut self) {
        if let Some(suggestion) = self
            .command_suggestions
            .get(self.command_suggestion_selected)
            .cloned()
        {
            self.command_text = suggestion;
            self.update_command_suggestions();
        }
    }

    /// Execute the typed command, returns true if the app should quit
    pub async fn execute_command(&mut self) -> Result<bool> {
        let command = self.command_text.trim().to_string();

        match command.as_str() {
            "" => {}
            "quit" | "q" => return Ok(true),
            "refresh" => {
                self.refresh_current().await?;
            }
            "notifications" => {
                self.enter_notifications_mode();
                return Ok(false);
            }
            "notifications clear" => {
                self.notification_manager.clear();
            }
            key if get_resource(key).is_some() => {
                self.switch_resource(key).await?;
            }
            other => {
                self.error_message = Some(format!("Unknown command: {}", other));
            }
        }

        Ok(false)
    }

    // =========================================================================
    // Form flows
    // =========================================================================

    /// Open the create form for the current collection
    pub async fn open_create_form(&mut self) {
        if self.readonly {
            self.show_warning("Read-only mode: write operations are disabled");
            return;
        }
        let Some(def) = self.current_resource() else {
            return;
        };

        let mut form = FormState::new_create(&self.current_resource_key, def);
        self.load_select_options(&mut form).await;

        self.form = Some(form);
        self.mode = Mode::Form;
    }

    /// Open the edit form for the selected record, preloaded via a
    /// GET-by-id. A missing record opens an empty form instead of failing.
    pub async fn open_edit_form(&mut self) {
        if self.readonly {
            self.show_warning("Read-only mode: write operations are disabled");
            return;
        }
        let Some(def) = self.current_resource() else {
            return;
        };
        let Some(id) = self.selected_item().and_then(|item| record_id(item, def)) else {
            return;
        };

        let record = match fetch_record(&self.client, def, &id).await {
            Ok(record) => Some(record),
            Err(e) => {
                let message = format_api_error(&e);
                tracing::warn!("Edit preload failed for {}/{}: {}", def.collection_path, id, e);
                let notif_id = self.notify_start(OperationType::Fetch, id.clone());
                self.notify_error(notif_id, message);
                None
            }
        };

        let mut form = FormState::new_edit(&self.current_resource_key, def, &id, record.as_ref());
        self.load_select_options(&mut form).await;

        // Align select fields with the preloaded record's values
        if let Some(record) = &record {
            for field in &mut form.fields {
                if field.def.kind == FieldKind::Select {
                    let current = extract_json_value(record, &field.def.name);
                    if let Some(pos) = field.options.iter().position(|o| o.value == current) {
                        field.selected_option = pos;
                    }
                }
            }
        }

        self.form = Some(form);
        self.mode = Mode::Form;
    }

    /// Fetch options for every select field of the form. The parse of the
    /// source collection is awaited before iterating; a failed load leaves
    /// the options empty and surfaces the error.
    async fn load_select_options(&mut self, form: &mut FormState) {
        for field in &mut form.fields {
            if field.def.kind != FieldKind::Select {
                continue;
            }
            let Some(source) = field
                .def
                .options_source
                .as_deref()
                .and_then(get_resource)
            else {
                continue;
            };

            match fetch_select_options(&self.client, source).await {
                Ok(options) => {
                    field.options = options;
                    field.selected_option = 0;
                }
                Err(e) => {
                    let message = format_api_error(&e);
                    let notif_id = self
                        .notify_start(OperationType::Fetch, source.display_name.clone());
                    self.notify_error(notif_id, message);
                }
            }
        }
    }

    /// Submit the open form: POST on create, PATCH on edit. On success the
    /// app navigates back to the list view and re-fetches; on failure the
    /// form stays open so the input is not lost.
    pub async fn submit_form(&mut self) -> Result<()> {
        let Some(form) = self.form.clone() else {
            return Ok(());
        };
        let Some(def) = get_resource(&form.resource_key) else {
            return Ok(());
        };

        let body = form.to_body();
        let label = {
            let name = form.name_value(def);
            if name.is_empty() {
                def.display_name.clone()
            } else {
                name
            }
        };

        let (op, result) = match &form.kind {
            FormKind::Create => (
                OperationType::Create,
                create_record(&self.client, def, body).await,
            ),
            FormKind::Edit { id } => (
                OperationType::Update,
                update_record(&self.client, def, id, body).await,
            ),
        };

        let notif_id = self.notify_start(op, label);

        match result {
            Ok(_) => {
                self.notify_success(notif_id);
                self.form = None;
                self.mode = Mode::List;
                self.refresh_current().await?;
            }
            Err(e) => {
                let message = format_api_error(&e);
                tracing::error!("Form submit failed: {}", e);
                self.notify_error(notif_id, message);
            }
        }

        Ok(())
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.mode = Mode::List;
    }

    // =========================================================================
    // Delete flow
    // =========================================================================

    /// Ask for confirmation before deleting the selected record. No
    /// request is issued here.
    pub fn request_delete(&mut self) {
        if self.readonly {
            self.show_warning("Read-only mode: write operations are disabled");
            return;
        }
        let Some(def) = self.current_resource() else {
            return;
        };
        let Some(item) = self.selected_item() else {
            return;
        };
        let Some(id) = record_id(item, def) else {
            return;
        };

        let label = {
            let name = extract_json_value(item, &def.name_field);
            if name == "-" || name.is_empty() {
                id.clone()
            } else {
                name
            }
        };

        self.pending_delete = Some(PendingDelete {
            resource_key: self.current_resource_key.clone(),
            id,
            message: format!("Delete '{}'?", label),
            label,
            selected_yes: false,
        });
        self.mode = Mode::Confirm;
    }

    /// The user confirmed: issue the DELETE, then clear and re-fetch the
    /// list. The row disappears only once the fresh list arrives.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let Some(pending) = self.pending_delete.take() else {
            self.mode = Mode::List;
            return Ok(());
        };
        self.mode = Mode::List;

        let Some(def) = get_resource(&pending.resource_key) else {
            return Ok(());
        };

        let notif_id = self.notify_start(OperationType::Delete, pending.label.clone());

        match delete_record(&self.client, def, &pending.id).await {
            Ok(_) => {
                self.notify_success(notif_id);
                self.refresh_current().await?;
            }
            Err(e) => {
                let message = format_api_error(&e);
                tracing::error!("Delete failed for {}/{}: {}", def.collection_path, pending.id, e);
                self.notify_error(notif_id, message);
            }
        }

        Ok(())
    }

    /// The user declined: drop the pending delete without issuing any
    /// request or touching the view.
    pub fn decline_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::List;
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    fn notify_start(&mut self, op: OperationType, label: String) -> Uuid {
        if !self.config.notifications.enabled {
            return Uuid::nil();
        }
        self.notification_manager
            .create_notification(op, self.current_resource_key.clone(), label)
    }

    fn notify_success(&mut self, id: Uuid) {
        if !id.is_nil() {
            self.notification_manager.mark_success(id);
        }
    }

    fn notify_error(&mut self, id: Uuid, error: String) {
        self.error_message = Some(error.clone());
        if !id.is_nil() {
            self.notification_manager.mark_error(id, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> Config {
        Config::default()
    }

    fn app_with(server: &MockServer, resource: &str, items: Vec<Value>) -> App {
        let client = ApiClient::new(&server.uri()).unwrap();
        App::from_initialized(client, resource.to_string(), items, test_config(), false)
    }

    #[tokio::test]
    async fn test_declined_delete_issues_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let items = vec![json!({"id": "1", "nomeCategoria": "Fiction"})];
        let mut app = app_with(&server, "categorias", items.clone());

        app.request_delete();
        assert_eq!(app.mode, Mode::Confirm);
        assert!(app.pending_delete.is_some());

        app.decline_delete();
        assert_eq!(app.mode, Mode::List);
        assert!(app.pending_delete.is_none());
        assert_eq!(app.filtered_items, items, "View unchanged after decline");

        server.verify().await;
    }

    #[tokio::test]
    async fn test_confirmed_delete_refreshes_from_backend() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/categorias/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/categorias"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let items = vec![json!({"id": "1", "nomeCategoria": "Fiction"})];
        let mut app = app_with(&server, "categorias", items);

        app.request_delete();
        app.confirm_delete().await.unwrap();

        assert_eq!(app.mode, Mode::List);
        assert!(app.filtered_items.is_empty(), "Row gone after fresh list");
        server.verify().await;
    }

    #[tokio::test]
    async fn test_create_submit_posts_and_navigates_back() {
        let server = MockServer::start().await;
        let expected_body = json!({"nomeCategoria": "Fiction", "descricaoCategoria": "desc"});

        Mock::given(method("POST"))
            .and(path("/categorias"))
            .and(body_json(&expected_body))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "7", "nomeCategoria": "Fiction", "descricaoCategoria": "desc"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/categorias"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "7", "nomeCategoria": "Fiction", "descricaoCategoria": "desc"}
            ])))
            .mount(&server)
            .await;

        let mut app = app_with(&server, "categorias", vec![]);
        app.open_create_form().await;
        assert_eq!(app.mode, Mode::Form);

        {
            let form = app.form.as_mut().unwrap();
            form.fields[0].value = "Fiction".to_string();
            form.fields[1].value = "desc".to_string();
        }

        app.submit_form().await.unwrap();

        assert_eq!(app.mode, Mode::List, "Navigates back to the listing");
        assert!(app.form.is_none());
        assert_eq!(app.filtered_items.len(), 1);
        server.verify().await;
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_form_open() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/categorias"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_with(&server, "categorias", vec![]);
        app.open_create_form().await;
        app.form.as_mut().unwrap().fields[0].value = "Fiction".to_string();

        app.submit_form().await.unwrap();

        assert_eq!(app.mode, Mode::Form, "Form stays open on failure");
        assert!(app.form.is_some());
        assert!(app.error_message.is_some(), "Failure is visible");
    }

    #[tokio::test]
    async fn test_edit_preload_not_found_opens_empty_form() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categorias/9"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let items = vec![json!({"id": "9", "nomeCategoria": "Ghost"})];
        let mut app = app_with(&server, "categorias", items);

        app.open_edit_form().await;

        assert_eq!(app.mode, Mode::Form);
        let form = app.form.as_ref().unwrap();
        assert!(matches!(form.kind, FormKind::Edit { ref id } if id == "9"));
        assert!(
            form.fields.iter().all(|f| f.value.is_empty()),
            "Not-found preload yields an empty form"
        );
        assert!(app.error_message.is_some());
    }

    #[tokio::test]
    async fn test_edit_preload_fills_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categorias/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "9", "nomeCategoria": "Fiction", "descricaoCategoria": "desc"
            })))
            .mount(&server)
            .await;

        let items = vec![json!({"id": "9", "nomeCategoria": "Fiction"})];
        let mut app = app_with(&server, "categorias", items);

        app.open_edit_form().await;

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.fields[0].value, "Fiction");
        assert_eq!(form.fields[1].value, "desc");
    }

    #[tokio::test]
    async fn test_readonly_blocks_writes() {
        let server = MockServer::start().await;
        let client = ApiClient::new(&server.uri()).unwrap();
        let items = vec![json!({"id": "1", "nomeCategoria": "Fiction"})];
        let mut app = App::from_initialized(
            client,
            "categorias".to_string(),
            items,
            test_config(),
            true,
        );

        app.open_create_form().await;
        assert_eq!(app.mode, Mode::Warning);
        assert!(app.form.is_none());

        app.warning_message = None;
        app.mode = Mode::List;
        app.request_delete();
        assert!(app.pending_delete.is_none());
    }

    #[tokio::test]
    async fn test_filter_preserves_order() {
        let server = MockServer::start().await;
        let items = vec![
            json!({"id": "1", "nomeCategoria": "Science Fiction"}),
            json!({"id": "2", "nomeCategoria": "History"}),
            json!({"id": "3", "nomeCategoria": "Fiction"}),
        ];
        let mut app = app_with(&server, "categorias", items);

        app.filter_text = "fiction".to_string();
        app.apply_filter();

        let ids: Vec<String> = app
            .filtered_items
            .iter()
            .map(|i| extract_json_value(i, "id"))
            .collect();
        assert_eq!(ids, vec!["1", "3"], "Server order preserved");
    }

    #[tokio::test]
    async fn test_form_body_types() {
        let server = MockServer::start().await;
        let mut app = app_with(&server, "livros", vec![]);
        // No categories mock mounted: select options stay empty, which is
        // the failure path load_select_options must tolerate.
        app.open_create_form().await;

        let form = app.form.as_mut().unwrap();
        for field in &mut form.fields {
            match field.def.name.as_str() {
                "id" => field.value = "10".into(),
                "titulo" => field.value = "Dune".into(),
                "anoPublicacao" => field.value = "1965".into(),
                "numeroPaginas" => field.value = "412".into(),
                _ => {}
            }
        }

        let body = form.to_body();
        assert_eq!(body["titulo"], json!("Dune"));
        assert_eq!(body["anoPublicacao"], json!(1965));
        assert_eq!(body["numeroPaginas"], json!(412));
        assert_eq!(body["categoria"], json!(""), "Empty select submits empty");
    }
}
