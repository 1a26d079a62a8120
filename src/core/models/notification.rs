//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How prominently a notification is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Something went wrong with the transaction (irregularity found)
    Alert,
    /// Needs a look (item back to pending, data only stored locally)
    Warning,
    /// Plain bookkeeping (entity created or removed)
    Info,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alert => write!(f, "alert"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A human-readable event derived from a state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short random id
    pub id: String,
    /// Message shown to the operator
    pub message: String,
    /// Severity
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// When it was raised
    pub timestamp: DateTime<Utc>,
    /// Whether the operator has seen it
    pub read: bool,
}
