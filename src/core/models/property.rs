//! Property (land parcel) model
//!
//! One registry entry (matrícula) under audit, with its own checklist.

use serde::{Deserialize, Serialize};

use super::{ChecklistItem, EntityId, ItemDraft};

/// A land parcel under audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Entity id
    pub id: EntityId,
    /// Display name (e.g. "Fazenda Santa Maria")
    pub name: String,
    /// Registry number
    #[serde(default)]
    pub matricula: String,
    /// Registry office holding the matrícula
    #[serde(default)]
    pub cartorio: String,
    /// Area in hectares, as written on the deed
    #[serde(default)]
    pub area: String,
    /// Municipality and state
    #[serde(default)]
    pub municipio: String,
    /// Owned checklist, in insertion order
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Property {
    /// Find an owned item by id
    #[must_use]
    pub fn item(&self, id: &EntityId) -> Option<&ChecklistItem> {
        self.items.iter().find(|i| &i.id == id)
    }
}

/// A property that has not been persisted yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    /// Display name
    pub name: String,
    /// Registry number
    #[serde(default)]
    pub matricula: String,
    /// Registry office
    #[serde(default)]
    pub cartorio: String,
    /// Area in hectares
    #[serde(default)]
    pub area: String,
    /// Municipality
    #[serde(default)]
    pub municipio: String,
    /// Seed checklist
    #[serde(default)]
    pub items: Vec<ItemDraft>,
}

impl PropertyDraft {
    /// Blank draft with the given name and seed items
    #[must_use]
    pub fn new(name: impl Into<String>, items: Vec<ItemDraft>) -> Self {
        Self {
            name: name.into(),
            items,
            ..Self::default()
        }
    }
}

/// Partial update of a property's registry fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPatch {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New registry number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matricula: Option<String>,
    /// New registry office
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cartorio: Option<String>,
    /// New area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// New municipality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipio: Option<String>,
}

impl PropertyPatch {
    /// Whether the patch carries no field at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.matricula.is_none()
            && self.cartorio.is_none()
            && self.area.is_none()
            && self.municipio.is_none()
    }

    /// Shallow-merge the patch into a property
    pub fn apply(&self, property: &mut Property) {
        if let Some(name) = &self.name {
            property.name.clone_from(name);
        }
        if let Some(matricula) = &self.matricula {
            property.matricula.clone_from(matricula);
        }
        if let Some(cartorio) = &self.cartorio {
            property.cartorio.clone_from(cartorio);
        }
        if let Some(area) = &self.area {
            property.area.clone_from(area);
        }
        if let Some(municipio) = &self.municipio {
            property.municipio.clone_from(municipio);
        }
    }
}
