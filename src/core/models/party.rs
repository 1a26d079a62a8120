//! Party model
//!
//! A buyer or seller in the transaction, either a natural person (PF, identified
//! by CPF) or a legal entity (PJ, identified by CNPJ).

use serde::{Deserialize, Serialize};

use super::{ChecklistItem, EntityId, ItemDraft};

/// Natural or legal person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyKind {
    /// Pessoa física
    #[serde(rename = "PF")]
    Pf,
    /// Pessoa jurídica
    #[serde(rename = "PJ")]
    Pj,
}

impl PartyKind {
    /// Placeholder name given to a freshly created party
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::Pf => "Nome da Pessoa",
            Self::Pj => "Razão Social",
        }
    }
}

impl std::fmt::Display for PartyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pf => write!(f, "PF"),
            Self::Pj => write!(f, "PJ"),
        }
    }
}

impl std::str::FromStr for PartyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pf" | "person" => Ok(Self::Pf),
            "pj" | "company" => Ok(Self::Pj),
            _ => Err(format!("Invalid party type: {s}. Use: pf, pj")),
        }
    }
}

/// Side of the transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyRole {
    /// Comprador
    Buyer,
    /// Vendedor
    Seller,
}

impl std::fmt::Display for PartyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buyer => write!(f, "buyer"),
            Self::Seller => write!(f, "seller"),
        }
    }
}

impl std::str::FromStr for PartyRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buyer" | "comprador" => Ok(Self::Buyer),
            "seller" | "vendedor" => Ok(Self::Seller),
            _ => Err(format!("Invalid role: {s}. Use: buyer, seller")),
        }
    }
}

/// A buyer or seller under audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Entity id
    pub id: EntityId,
    /// PF or PJ
    #[serde(rename = "type")]
    pub kind: PartyKind,
    /// Full name or corporate name
    pub name: String,
    /// CPF or CNPJ
    #[serde(default)]
    pub doc: String,
    /// Buyer or seller
    pub role: PartyRole,
    /// Owned checklist, in insertion order
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Party {
    /// Find an owned item by id
    #[must_use]
    pub fn item(&self, id: &EntityId) -> Option<&ChecklistItem> {
        self.items.iter().find(|i| &i.id == id)
    }
}

/// A party that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyDraft {
    /// PF or PJ
    #[serde(rename = "type")]
    pub kind: PartyKind,
    /// Full name or corporate name
    pub name: String,
    /// CPF or CNPJ
    #[serde(default)]
    pub doc: String,
    /// Buyer or seller
    pub role: PartyRole,
    /// Seed checklist
    #[serde(default)]
    pub items: Vec<ItemDraft>,
}

/// Partial update of a party
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyPatch {
    /// New PF/PJ classification
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PartyKind>,
    /// New name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New CPF/CNPJ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// New role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<PartyRole>,
}

impl PartyPatch {
    /// Whether the patch carries no field at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.kind.is_none() && self.name.is_none() && self.doc.is_none() && self.role.is_none()
    }

    /// Shallow-merge the patch into a party
    pub fn apply(&self, party: &mut Party) {
        if let Some(kind) = self.kind {
            party.kind = kind;
        }
        if let Some(name) = &self.name {
            party.name.clone_from(name);
        }
        if let Some(doc) = &self.doc {
            party.doc.clone_from(doc);
        }
        if let Some(role) = self.role {
            party.role = role;
        }
    }
}
