//! Local fallback for failed creates
//!
//! When the remote store cannot take a new entity, the entity is kept anyway
//! under a local-origin id. The failed call is never retried: a local entity
//! lives until the next full reload, where the remote store wins.

use crate::core::models::{
    ChecklistItem, EntityId, EntityKind, ItemDraft, Party, PartyDraft, Property, PropertyDraft,
};
use crate::core::ports::GatewayError;

/// Outcome of a create that always yields an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted<T> {
    /// Stored remotely, ids are durable
    Remote(T),
    /// Kept only in memory, ids are local
    Local(T),
}

impl<T> Persisted<T> {
    /// The entity, wherever it lives
    #[must_use]
    pub const fn entity(&self) -> &T {
        match self {
            Self::Remote(entity) | Self::Local(entity) => entity,
        }
    }

    /// Take the entity out
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Remote(entity) | Self::Local(entity) => entity,
        }
    }

    /// Whether the remote store rejected or never saw the entity
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// Transform the entity, keeping the outcome
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Persisted<U> {
        match self {
            Self::Remote(entity) => Persisted::Remote(f(entity)),
            Self::Local(entity) => Persisted::Local(f(entity)),
        }
    }
}

/// Turn a gateway result into an entity, building a local one on failure
pub fn persist_or_local<T>(
    result: Result<T, GatewayError>,
    what: &str,
    fallback: impl FnOnce() -> T,
) -> Persisted<T> {
    match result {
        Ok(entity) => Persisted::Remote(entity),
        Err(e) => {
            log::warn!("Could not persist {what}, keeping it locally: {e}");
            Persisted::Local(fallback())
        },
    }
}

/// Materialize a property draft with local ids for it and every seed item
#[must_use]
pub fn localize_property(draft: PropertyDraft) -> Property {
    Property {
        id: EntityId::local(EntityKind::Property),
        name: draft.name,
        matricula: draft.matricula,
        cartorio: draft.cartorio,
        area: draft.area,
        municipio: draft.municipio,
        items: localize_items(draft.items),
    }
}

/// Materialize a party draft with local ids for it and every seed item
#[must_use]
pub fn localize_party(draft: PartyDraft) -> Party {
    Party {
        id: EntityId::local(EntityKind::Party),
        kind: draft.kind,
        name: draft.name,
        doc: draft.doc,
        role: draft.role,
        items: localize_items(draft.items),
    }
}

/// Materialize an item draft under a local id
#[must_use]
pub fn localize_item(draft: ItemDraft) -> ChecklistItem {
    ChecklistItem::from_draft(EntityId::local(EntityKind::Item), draft)
}

fn localize_items(drafts: Vec<ItemDraft>) -> Vec<ChecklistItem> {
    drafts.into_iter().map(localize_item).collect()
}
