//! Audit state: the root aggregate
//!
//! One `AuditState` lives per session. It owns every property and party, and
//! through them every checklist item.

use serde::{Deserialize, Serialize};

use super::{ChecklistItem, EntityId, Party, Property};

/// Which kind of entity owns an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentType {
    /// Owned by a property
    Property,
    /// Owned by a party
    Party,
}

impl ParentType {
    /// Portuguese label used in notifications
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Property => "Imóvel",
            Self::Party => "Parte",
        }
    }
}

impl std::fmt::Display for ParentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Property => write!(f, "property"),
            Self::Party => write!(f, "party"),
        }
    }
}

impl std::str::FromStr for ParentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "property" => Ok(Self::Property),
            "party" => Ok(Self::Party),
            _ => Err(format!("Invalid parent type: {s}. Use: property, party")),
        }
    }
}

/// Reference from an item to its owner
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentRef {
    /// Owner id
    pub id: EntityId,
    /// Owner kind
    pub kind: ParentType,
}

impl ParentRef {
    /// Reference a property
    #[must_use]
    pub const fn property(id: EntityId) -> Self {
        Self {
            id,
            kind: ParentType::Property,
        }
    }

    /// Reference a party
    #[must_use]
    pub const fn party(id: EntityId) -> Self {
        Self {
            id,
            kind: ParentType::Party,
        }
    }
}

/// Where an item lives in the tree
#[derive(Debug, Clone, Copy)]
pub struct ItemLocation<'a> {
    /// The item itself
    pub item: &'a ChecklistItem,
    /// Owner id
    pub parent_id: &'a EntityId,
    /// Owner kind
    pub parent_type: ParentType,
    /// Owner display name
    pub owner_name: &'a str,
}

impl ItemLocation<'_> {
    /// Owned reference to the item's parent
    #[must_use]
    pub fn parent(&self) -> ParentRef {
        ParentRef {
            id: self.parent_id.clone(),
            kind: self.parent_type,
        }
    }
}

/// The full audit tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditState {
    /// Land parcels under audit
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Buyers and sellers
    #[serde(default)]
    pub parties: Vec<Party>,
    /// Free-text notes about the whole transaction
    #[serde(default)]
    pub general_notes: String,
}

impl AuditState {
    /// Whether the tree holds neither properties nor parties
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.parties.is_empty()
    }

    /// Find a property by id
    #[must_use]
    pub fn property(&self, id: &EntityId) -> Option<&Property> {
        self.properties.iter().find(|p| &p.id == id)
    }

    /// Find a property by id, mutably
    pub fn property_mut(&mut self, id: &EntityId) -> Option<&mut Property> {
        self.properties.iter_mut().find(|p| &p.id == id)
    }

    /// Find a party by id
    #[must_use]
    pub fn party(&self, id: &EntityId) -> Option<&Party> {
        self.parties.iter().find(|p| &p.id == id)
    }

    /// Find a party by id, mutably
    pub fn party_mut(&mut self, id: &EntityId) -> Option<&mut Party> {
        self.parties.iter_mut().find(|p| &p.id == id)
    }

    /// Whether the referenced parent exists
    #[must_use]
    pub fn has_parent(&self, parent: &ParentRef) -> bool {
        match parent.kind {
            ParentType::Property => self.property(&parent.id).is_some(),
            ParentType::Party => self.party(&parent.id).is_some(),
        }
    }

    /// The item list owned by a parent
    pub fn items_mut(&mut self, parent: &ParentRef) -> Option<&mut Vec<ChecklistItem>> {
        match parent.kind {
            ParentType::Property => self.property_mut(&parent.id).map(|p| &mut p.items),
            ParentType::Party => self.party_mut(&parent.id).map(|p| &mut p.items),
        }
    }

    /// Locate an item anywhere in the tree
    ///
    /// Properties are scanned before parties.
    #[must_use]
    pub fn locate_item(&self, id: &EntityId) -> Option<ItemLocation<'_>> {
        let in_properties = self.properties.iter().find_map(|p| {
            p.item(id).map(|item| ItemLocation {
                item,
                parent_id: &p.id,
                parent_type: ParentType::Property,
                owner_name: &p.name,
            })
        });

        in_properties.or_else(|| {
            self.parties.iter().find_map(|p| {
                p.item(id).map(|item| ItemLocation {
                    item,
                    parent_id: &p.id,
                    parent_type: ParentType::Party,
                    owner_name: &p.name,
                })
            })
        })
    }

    /// Find an item anywhere in the tree, mutably
    pub fn item_mut(&mut self, id: &EntityId) -> Option<&mut ChecklistItem> {
        let parent = self.locate_item(id)?.parent();
        self.items_mut(&parent)?.iter_mut().find(|i| &i.id == id)
    }

    /// Iterate every item in the tree (properties first)
    pub fn all_items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.properties
            .iter()
            .flat_map(|p| p.items.iter())
            .chain(self.parties.iter().flat_map(|p| p.items.iter()))
    }
}
