//! Session notification log
//!
//! Append-only list of derived events, newest first. It lives as long as the
//! session and is never persisted.

use chrono::Utc;

use crate::core::models::{Notification, NotificationKind};

/// Length of a notification id
const ID_LEN: usize = 9;

/// Most-recent-first log of notifications
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    /// Create an empty log
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a new unread notification at the front of the log
    pub fn append(&mut self, message: impl Into<String>, kind: NotificationKind) {
        let random = uuid::Uuid::new_v4().simple().to_string();
        let notification = Notification {
            id: random[..ID_LEN].to_string(),
            message: message.into(),
            kind,
            timestamp: Utc::now(),
            read: false,
        };
        log::debug!("[{}] {}", notification.kind, notification.message);
        self.entries.insert(0, notification);
    }

    /// Mark every notification as read
    pub fn mark_all_read(&mut self) {
        for entry in &mut self.entries {
            entry.read = true;
        }
    }

    /// Drop every notification
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Notifications, newest first
    #[must_use]
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Number of notifications not yet read
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    /// Number of notifications
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of notifications of a given kind
    #[must_use]
    pub fn count_kind(&self, kind: NotificationKind) -> usize {
        self.entries.iter().filter(|n| n.kind == kind).count()
    }
}
