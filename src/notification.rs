//! Notification System
//!
//! Manages notifications for CRUD operations with toast messages and
//! history tracking. Every operation outcome, success or failure, becomes
//! a notification; the UI decides how to show it.

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Type of operation being performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationType {
    Create,
    Update,
    Delete,
    Fetch,
    Other(String),
}

impl OperationType {
    pub fn display_name(&self) -> &str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::Fetch => "Fetch",
            Self::Other(name) => name,
        }
    }

    pub fn past_tense(&self) -> &str {
        match self {
            Self::Create => "Created",
            Self::Update => "Updated",
            Self::Delete => "Deleted",
            Self::Fetch => "Fetched",
            Self::Other(_) => "Completed",
        }
    }

    pub fn present_participle(&self) -> &str {
        match self {
            Self::Create => "Creating",
            Self::Update => "Updating",
            Self::Delete => "Deleting",
            Self::Fetch => "Fetching",
            Self::Other(_) => "Processing",
        }
    }
}

/// Status of a notification/operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    /// Request issued, response not yet processed
    Pending,
    /// Operation completed successfully
    Success,
    /// Operation failed with error message
    Error(String),
}

impl NotificationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Error(_))
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Pending => "◯",
            Self::Success => "✓",
            Self::Error(_) => "✗",
        }
    }
}

/// A single notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub operation_type: OperationType,
    pub resource_type: String,
    pub resource_label: String,
    pub status: NotificationStatus,
    pub created_at: Instant,
    pub completed_at: Option<Instant>,
}

impl Notification {
    pub fn new(
        operation_type: OperationType,
        resource_type: String,
        resource_label: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation_type,
            resource_type,
            resource_label,
            status: NotificationStatus::Pending,
            created_at: Instant::now(),
            completed_at: None,
        }
    }

    /// Mark operation as successful
    pub fn set_success(&mut self) {
        self.status = NotificationStatus::Success;
        self.completed_at = Some(Instant::now());
    }

    /// Mark operation as failed
    pub fn set_error(&mut self, error: String) {
        self.status = NotificationStatus::Error(error);
        self.completed_at = Some(Instant::now());
    }

    /// Get duration of operation (or elapsed time if still running)
    pub fn duration(&self) -> Duration {
        self.completed_at
            .unwrap_or_else(Instant::now)
            .duration_since(self.created_at)
    }

    /// Format duration for display
    pub fn duration_display(&self) -> String {
        let d = self.duration();
        if d.as_secs() < 1 {
            format!("{}ms", d.as_millis())
        } else if d.as_secs() < 60 {
            format!("{}s", d.as_secs())
        } else {
            format!("{}m{}s", d.as_secs() / 60, d.as_secs() % 60)
        }
    }

    /// Format notification for toast display
    pub fn toast_message(&self) -> String {
        let icon = self.status.icon();
        match &self.status {
            NotificationStatus::Pending => format!(
                "{} {} {}...",
                icon,
                self.operation_type.present_participle(),
                self.resource_label
            ),
            NotificationStatus::Success => format!(
                "{} {} {}",
                icon,
                self.operation_type.past_tense(),
                self.resource_label
            ),
            NotificationStatus::Error(err) => {
                format!("{} Failed: {} - {}", icon, self.resource_label, err)
            }
        }
    }
}

/// Notification manager
pub struct NotificationManager {
    /// All notifications (recent first)
    pub notifications: VecDeque<Notification>,
    /// Maximum notifications to keep in history
    pub max_history: usize,
    /// Toast display duration
    pub toast_duration: Duration,
    /// Last toast notification time (for display)
    last_toast_time: Option<Instant>,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: VecDeque::new(),
            max_history: 50,
            toast_duration: Duration::from_secs(5),
            last_toast_time: None,
        }
    }

    /// Create a new notification for an operation
    pub fn create_notification(
        &mut self,
        operation_type: OperationType,
        resource_type: String,
        resource_label: String,
    ) -> Uuid {
        let notification = Notification::new(operation_type, resource_type, resource_label);
        let id = notification.id;
        self.notifications.push_front(notification);
        self.last_toast_time = Some(Instant::now());
        self.trim_history();
        id
    }

    /// Mark a notification as successful
    pub fn mark_success(&mut self, id: Uuid) {
        if let Some(notif) = self.notifications.iter_mut().find(|n| n.id == id) {
            notif.set_success();
            self.last_toast_time = Some(Instant::now());
        }
    }

    /// Mark a notification as failed
    pub fn mark_error(&mut self, id: Uuid, error: String) {
        if let Some(notif) = self.notifications.iter_mut().find(|n| n.id == id) {
            notif.set_error(error);
            self.last_toast_time = Some(Instant::now());
        }
    }

    /// Get notification by ID
    pub fn get(&self, id: Uuid) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    /// Get the most recent notification while its toast is still visible
    pub fn current_toast(&self) -> Option<&Notification> {
        let last_time = self.last_toast_time?;
        if last_time.elapsed() > self.toast_duration {
            return None;
        }
        self.notifications.front()
    }

    /// Get count of operations still awaiting their outcome
    pub fn pending_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|n| !n.status.is_terminal())
            .count()
    }

    /// Clear all notifications
    pub fn clear(&mut self) {
        self.notifications.clear();
        self.last_toast_time = None;
    }

    /// Trim history to max size
    fn trim_history(&mut self) {
        while self.notifications.len() > self.max_history {
            // Remove oldest completed notification
            if let Some(pos) = self
                .notifications
                .iter()
                .rposition(|n| n.status.is_terminal())
            {
                self.notifications.remove(pos);
            } else {
                self.notifications.pop_back();
            }
        }
    }

    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_lifecycle() {
        let mut manager = NotificationManager::new();

        let id = manager.create_notification(
            OperationType::Create,
            "categorias".to_string(),
            "Fiction".to_string(),
        );

        assert_eq!(manager.notifications.len(), 1);
        assert!(matches!(
            manager.get(id).unwrap().status,
            NotificationStatus::Pending
        ));

        manager.mark_success(id);
        assert!(matches!(
            manager.get(id).unwrap().status,
            NotificationStatus::Success
        ));
        assert_eq!(manager.pending_count(), 0);
    }

    #[test]
    fn test_error_keeps_message() {
        let mut manager = NotificationManager::new();
        let id = manager.create_notification(
            OperationType::Delete,
            "livros".to_string(),
            "42".to_string(),
        );

        manager.mark_error(id, "Record not found.".to_string());
        let notif = manager.get(id).unwrap();
        assert!(matches!(notif.status, NotificationStatus::Error(_)));
        assert!(notif.toast_message().contains("Record not found."));
    }

    #[test]
    fn test_toast_message_formats() {
        let mut notif = Notification::new(
            OperationType::Create,
            "categorias".to_string(),
            "Fiction".to_string(),
        );

        let msg = notif.toast_message();
        assert!(msg.contains("Creating"));
        assert!(msg.contains("Fiction"));

        notif.set_success();
        let msg = notif.toast_message();
        assert!(msg.contains("Created"));
        assert!(msg.contains("✓"));
    }

    #[test]
    fn test_history_trims_completed_first() {
        let mut manager = NotificationManager::new();
        manager.max_history = 2;

        let first = manager.create_notification(
            OperationType::Create,
            "categorias".into(),
            "a".into(),
        );
        manager.mark_success(first);
        manager.create_notification(OperationType::Create, "categorias".into(), "b".into());
        manager.create_notification(OperationType::Create, "categorias".into(), "c".into());

        assert_eq!(manager.notifications.len(), 2);
        assert!(manager.get(first).is_none(), "Completed entry trimmed first");
    }
}
