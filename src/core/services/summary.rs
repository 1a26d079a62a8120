//! Dashboard aggregates
//!
//! Read-only views over the audit tree: overall progress, per-property counts,
//! category grouping and party search. Pure functions with no I/O.

use serde::Serialize;

use crate::core::models::{AuditState, ChecklistItem, EntityId, Party, Status};

/// Overall progress of the audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    /// Items across properties and parties
    pub total_items: usize,
    /// Items still pending
    pub pending: usize,
    /// Items flagged `issue` or `expired`
    pub attention: usize,
    /// Share of items no longer pending, 0-100
    pub progress: u8,
    /// Pending items owned by properties
    pub property_pending: usize,
    /// Attention items owned by properties
    pub property_attention: usize,
    /// Pending items owned by parties
    pub party_pending: usize,
    /// Attention items owned by parties
    pub party_attention: usize,
    /// One line per property
    pub properties: Vec<PropertyProgress>,
}

/// Regular items of one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyProgress {
    /// Property id
    pub id: EntityId,
    /// Property name
    pub name: String,
    /// Items with status `ok`
    pub regular: usize,
    /// All items
    pub total: usize,
}

/// Items of one category, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup<'a> {
    /// Category label
    pub category: &'a str,
    /// Items in this category
    pub items: Vec<&'a ChecklistItem>,
    /// Items `ok` or `waived`
    pub resolved: usize,
    /// Items `issue` or `expired`
    pub attention: usize,
    /// Share of resolved items, 0-100
    pub progress: u8,
}

/// Compute the dashboard aggregates
#[must_use]
pub fn summarize(state: &AuditState) -> AuditSummary {
    let count = |items: &[ChecklistItem], pred: fn(Status) -> bool| {
        items.iter().filter(|i| pred(i.status)).count()
    };
    let is_pending = |s: Status| s == Status::Pending;

    let mut property_pending = 0;
    let mut property_attention = 0;
    let mut property_items = 0;
    let mut properties = Vec::with_capacity(state.properties.len());
    for property in &state.properties {
        property_pending += count(&property.items, is_pending);
        property_attention += count(&property.items, Status::needs_attention);
        property_items += property.items.len();
        properties.push(PropertyProgress {
            id: property.id.clone(),
            name: property.name.clone(),
            regular: count(&property.items, |s| s == Status::Ok),
            total: property.items.len(),
        });
    }

    let mut party_pending = 0;
    let mut party_attention = 0;
    let mut party_items = 0;
    for party in &state.parties {
        party_pending += count(&party.items, is_pending);
        party_attention += count(&party.items, Status::needs_attention);
        party_items += party.items.len();
    }

    let total_items = property_items + party_items;
    let pending = property_pending + party_pending;

    AuditSummary {
        total_items,
        pending,
        attention: property_attention + party_attention,
        progress: percent(total_items - pending, total_items),
        property_pending,
        property_attention,
        party_pending,
        party_attention,
        properties,
    }
}

/// Group items by category, keeping first-seen category order
#[must_use]
pub fn group_by_category(items: &[ChecklistItem]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();

    for item in items {
        let index = match groups.iter().position(|g| g.category == item.category) {
            Some(index) => index,
            None => {
                groups.push(CategoryGroup {
                    category: &item.category,
                    items: Vec::new(),
                    resolved: 0,
                    attention: 0,
                    progress: 0,
                });
                groups.len() - 1
            },
        };

        let group = &mut groups[index];
        group.items.push(item);
        if item.status.is_resolved() {
            group.resolved += 1;
        }
        if item.status.needs_attention() {
            group.attention += 1;
        }
    }

    for group in &mut groups {
        group.progress = percent(group.resolved, group.items.len());
    }
    groups
}

/// Parties whose name or document contains the query, case-insensitively
#[must_use]
pub fn filter_parties<'a>(parties: &'a [Party], query: &str) -> Vec<&'a Party> {
    let needle = query.to_lowercase();
    parties
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle) || p.doc.to_lowercase().contains(&needle))
        .collect()
}

/// Rounded percentage; 0 when the whole is empty
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round().min(100.0) as u8
}
