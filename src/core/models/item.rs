//! Checklist item model
//!
//! A checklist item is a single verifiable fact or document (a certificate, a
//! registry record, a tax receipt) with a status and free-text notes.

use serde::{Deserialize, Serialize};

use super::{EntityId, Status};

/// A checklist item owned by a property or a party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Unique within the owning entity
    pub id: EntityId,
    /// Grouping label (e.g. "Ambiental")
    pub category: String,
    /// Short name of the document or check
    pub name: String,
    /// What has to be verified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current verification status
    #[serde(default)]
    pub status: Status,
    /// Operator notes (protocol numbers, findings)
    #[serde(default)]
    pub notes: String,
    /// Last change (RFC3339)
    pub updated_at: String,
}

impl ChecklistItem {
    /// Materialize a draft under the given id
    #[must_use]
    pub fn from_draft(id: EntityId, draft: ItemDraft) -> Self {
        Self {
            id,
            category: draft.category,
            name: draft.name,
            description: draft.description,
            status: draft.status,
            notes: draft.notes,
            updated_at: draft.updated_at,
        }
    }
}

/// An item that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    /// Grouping label
    pub category: String,
    /// Short name
    pub name: String,
    /// What has to be verified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial status
    #[serde(default)]
    pub status: Status,
    /// Initial notes
    #[serde(default)]
    pub notes: String,
    /// Creation time (RFC3339)
    pub updated_at: String,
}

impl ItemDraft {
    /// Create a pending draft stamped with the current time
    #[must_use]
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            description: None,
            status: Status::Pending,
            notes: String::new(),
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Static definition of a checklist entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTemplate {
    /// Grouping label
    pub category: &'static str,
    /// Short name
    pub name: &'static str,
    /// What has to be verified
    pub description: &'static str,
}

impl ItemTemplate {
    /// Produce a fresh pending draft from this template
    #[must_use]
    pub fn draft(&self) -> ItemDraft {
        ItemDraft::new(self.category, self.name).with_description(self.description)
    }
}

/// Partial update of a checklist item
///
/// Only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    /// New category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// New notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// New change timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ItemPatch {
    /// Patch that only sets the status
    #[must_use]
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Patch that only sets the notes
    #[must_use]
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    /// Whether the patch carries no field at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.notes.is_none()
            && self.updated_at.is_none()
    }

    /// Whether the patch records verification progress (status or notes)
    #[must_use]
    pub const fn records_progress(&self) -> bool {
        self.status.is_some() || self.notes.is_some()
    }

    /// Shallow-merge the patch into an item
    pub fn apply(&self, item: &mut ChecklistItem) {
        if let Some(category) = &self.category {
            item.category.clone_from(category);
        }
        if let Some(name) = &self.name {
            item.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            item.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(notes) = &self.notes {
            item.notes.clone_from(notes);
        }
        if let Some(updated_at) = &self.updated_at {
            item.updated_at.clone_from(updated_at);
        }
    }
}
