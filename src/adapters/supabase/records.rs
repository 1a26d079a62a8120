//! Flat remote records
//!
//! The remote store keeps four collections: properties, parties, a single
//! `audit_items` table tagged with `(parent_id, parent_type)`, and the
//! `audit_settings` singleton. This module maps between those rows and the
//! nested [`AuditState`].

use serde::{Deserialize, Serialize};

use crate::core::models::{
    AuditState, ChecklistItem, EntityId, ItemDraft, ItemPatch, ParentRef, ParentType, Party,
    PartyDraft, PartyKind, PartyRole, Property, PropertyDraft, Status,
};

// =============================================================================
// ROWS
// =============================================================================

/// A row of the `properties` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Row id
    pub id: EntityId,
    /// Display name
    pub name: String,
    /// Registry number
    #[serde(default)]
    pub matricula: String,
    /// Registry office
    #[serde(default)]
    pub cartorio: String,
    /// Area in hectares, as typed
    #[serde(default)]
    pub area: String,
    /// Municipality
    #[serde(default)]
    pub municipio: String,
}

/// A row of the `parties` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRecord {
    /// Row id
    pub id: EntityId,
    /// PF or PJ
    #[serde(rename = "type")]
    pub kind: PartyKind,
    /// Name or corporate name
    pub name: String,
    /// CPF or CNPJ
    #[serde(default)]
    pub doc: String,
    /// Buyer or seller
    pub role: PartyRole,
}

/// A row of the `audit_items` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Row id
    pub id: EntityId,
    /// Owning property or party
    pub parent_id: EntityId,
    /// Which table `parent_id` points into
    pub parent_type: ParentType,
    /// Grouping label
    pub category: String,
    /// Item name
    pub name: String,
    /// Optional guidance text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Progress status
    #[serde(default)]
    pub status: Status,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Last progress change, RFC 3339; the column keeps the tree's camelCase name
    #[serde(default, rename = "updatedAt")]
    pub updated_at: String,
}

/// The `audit_settings` singleton
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    /// Free-form notes for the whole audit
    #[serde(default)]
    pub general_notes: String,
}

/// Property row without the server-assigned id
#[derive(Debug, Clone, Serialize)]
pub struct NewPropertyRecord<'a> {
    pub(crate) name: &'a str,
    pub(crate) matricula: &'a str,
    pub(crate) cartorio: &'a str,
    pub(crate) area: &'a str,
    pub(crate) municipio: &'a str,
}

impl<'a> From<&'a PropertyDraft> for NewPropertyRecord<'a> {
    fn from(draft: &'a PropertyDraft) -> Self {
        Self {
            name: &draft.name,
            matricula: &draft.matricula,
            cartorio: &draft.cartorio,
            area: &draft.area,
            municipio: &draft.municipio,
        }
    }
}

/// Party row without the server-assigned id
#[derive(Debug, Clone, Serialize)]
pub struct NewPartyRecord<'a> {
    #[serde(rename = "type")]
    pub(crate) kind: PartyKind,
    pub(crate) name: &'a str,
    pub(crate) doc: &'a str,
    pub(crate) role: PartyRole,
}

impl<'a> From<&'a PartyDraft> for NewPartyRecord<'a> {
    fn from(draft: &'a PartyDraft) -> Self {
        Self {
            kind: draft.kind,
            name: &draft.name,
            doc: &draft.doc,
            role: draft.role,
        }
    }
}

/// Item row without the server-assigned id
#[derive(Debug, Clone, Serialize)]
pub struct NewItemRecord<'a> {
    pub(crate) parent_id: &'a str,
    pub(crate) parent_type: ParentType,
    pub(crate) category: &'a str,
    pub(crate) name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<&'a str>,
    pub(crate) status: Status,
    pub(crate) notes: &'a str,
    #[serde(rename = "updatedAt")]
    pub(crate) updated_at: &'a str,
}

impl<'a> NewItemRecord<'a> {
    /// Tag a draft with its parent
    #[must_use]
    pub fn new(draft: &'a ItemDraft, parent: &'a ParentRef) -> Self {
        Self {
            parent_id: parent.id.as_str(),
            parent_type: parent.kind,
            category: &draft.category,
            name: &draft.name,
            description: draft.description.as_deref(),
            status: draft.status,
            notes: &draft.notes,
            updated_at: &draft.updated_at,
        }
    }
}

/// Item fields to write, in row naming
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemPatchRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    updated_at: Option<&'a str>,
}

impl<'a> From<&'a ItemPatch> for ItemPatchRecord<'a> {
    fn from(patch: &'a ItemPatch) -> Self {
        Self {
            category: patch.category.as_deref(),
            name: patch.name.as_deref(),
            description: patch.description.as_deref(),
            status: patch.status,
            notes: patch.notes.as_deref(),
            updated_at: patch.updated_at.as_deref(),
        }
    }
}

// =============================================================================
// ROW <-> TREE
// =============================================================================

impl From<ItemRecord> for ChecklistItem {
    fn from(record: ItemRecord) -> Self {
        Self {
            id: record.id,
            category: record.category,
            name: record.name,
            description: record.description,
            status: record.status,
            notes: record.notes,
            updated_at: record.updated_at,
        }
    }
}

impl ItemRecord {
    /// Tag a tree item with its parent
    #[must_use]
    pub fn tagged(item: &ChecklistItem, parent: &ParentRef) -> Self {
        Self {
            id: item.id.clone(),
            parent_id: parent.id.clone(),
            parent_type: parent.kind,
            category: item.category.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            status: item.status,
            notes: item.notes.clone(),
            updated_at: item.updated_at.clone(),
        }
    }

    fn belongs_to(&self, id: &EntityId, kind: ParentType) -> bool {
        self.parent_type == kind && &self.parent_id == id
    }
}

impl PropertyRecord {
    /// Attach items to the row
    #[must_use]
    pub fn into_property(self, items: Vec<ChecklistItem>) -> Property {
        Property {
            id: self.id,
            name: self.name,
            matricula: self.matricula,
            cartorio: self.cartorio,
            area: self.area,
            municipio: self.municipio,
            items,
        }
    }
}

impl PartyRecord {
    /// Attach items to the row
    #[must_use]
    pub fn into_party(self, items: Vec<ChecklistItem>) -> Party {
        Party {
            id: self.id,
            kind: self.kind,
            name: self.name,
            doc: self.doc,
            role: self.role,
            items,
        }
    }
}

/// Flat rows of a whole tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatAudit {
    /// Property rows in tree order
    pub properties: Vec<PropertyRecord>,
    /// Party rows in tree order
    pub parties: Vec<PartyRecord>,
    /// Item rows, properties' items first
    pub items: Vec<ItemRecord>,
    /// Settings row
    pub settings: SettingsRecord,
}

/// Split a tree into rows
#[must_use]
pub fn flatten(state: &AuditState) -> FlatAudit {
    let mut flat = FlatAudit {
        settings: SettingsRecord {
            general_notes: state.general_notes.clone(),
        },
        ..FlatAudit::default()
    };

    for property in &state.properties {
        let parent = ParentRef::property(property.id.clone());
        flat.items.extend(property.items.iter().map(|i| ItemRecord::tagged(i, &parent)));
        flat.properties.push(PropertyRecord {
            id: property.id.clone(),
            name: property.name.clone(),
            matricula: property.matricula.clone(),
            cartorio: property.cartorio.clone(),
            area: property.area.clone(),
            municipio: property.municipio.clone(),
        });
    }

    for party in &state.parties {
        let parent = ParentRef::party(party.id.clone());
        flat.items.extend(party.items.iter().map(|i| ItemRecord::tagged(i, &parent)));
        flat.parties.push(PartyRecord {
            id: party.id.clone(),
            kind: party.kind,
            name: party.name.clone(),
            doc: party.doc.clone(),
            role: party.role,
        });
    }

    flat
}

/// Join rows back into a tree
///
/// Items are matched on `(parent_id, parent_type)` and keep their row order.
/// Items whose parent is missing are dropped.
#[must_use]
pub fn assemble(flat: FlatAudit) -> AuditState {
    let FlatAudit {
        properties,
        parties,
        items,
        settings,
    } = flat;

    let take = |id: &EntityId, kind: ParentType| -> Vec<ChecklistItem> {
        items
            .iter()
            .filter(|r| r.belongs_to(id, kind))
            .cloned()
            .map(ChecklistItem::from)
            .collect()
    };

    let properties = properties
        .into_iter()
        .map(|p| {
            let owned = take(&p.id, ParentType::Property);
            p.into_property(owned)
        })
        .collect();

    let parties = parties
        .into_iter()
        .map(|p| {
            let owned = take(&p.id, ParentType::Party);
            p.into_party(owned)
        })
        .collect();

    AuditState {
        properties,
        parties,
        general_notes: settings.general_notes,
    }
}
