//! One CLI session: load the audit, apply a command, flush, print

use serde::Serialize;

use ruralaudit::adapters;
use ruralaudit::config::Config;
use ruralaudit::core::models::{AuditState, EntityId, ParentRef};
use ruralaudit::core::services::AuditStore;
use ruralaudit::output::{HumanOutput, OperationResult, OutputMode, Report};

/// A loaded audit plus how it is persisted
#[derive(Debug)]
pub struct Session {
    pub store: AuditStore,
    pub offline: bool,
}

impl Session {
    /// Connect to the configured store and load the audit
    pub async fn open(config: &Config) -> Self {
        let gateway = adapters::gateway_from_config(config);
        let mut store = AuditStore::new(gateway)
            .with_default_property_name(config.audit.default_property_name.clone());
        store.load().await;
        Self {
            store,
            offline: !config.has_persistence(),
        }
    }

    /// Wait for remote writes, then print the result and the session's notifications
    pub async fn finish<T: Serialize + HumanOutput>(mut self, result: &T, mode: OutputMode) {
        self.store.flush().await;
        Report::new(result, self.store.notifications().entries()).render(mode);
    }

    /// Print a failure and report it to the caller
    pub async fn fail(self, message: impl Into<String>, mode: OutputMode) -> anyhow::Result<bool> {
        self.finish(&OperationResult::failed(message), mode).await;
        Ok(false)
    }
}

/// Find a property by id, then by case-insensitive name
pub fn find_property(state: &AuditState, selector: &str) -> Option<EntityId> {
    state
        .properties
        .iter()
        .find(|p| p.id == selector)
        .or_else(|| state.properties.iter().find(|p| same_name(&p.name, selector)))
        .map(|p| p.id.clone())
}

/// Find a party by id, then by case-insensitive name
pub fn find_party(state: &AuditState, selector: &str) -> Option<EntityId> {
    state
        .parties
        .iter()
        .find(|p| p.id == selector)
        .or_else(|| state.parties.iter().find(|p| same_name(&p.name, selector)))
        .map(|p| p.id.clone())
}

/// How an item selector resolved
#[derive(Debug)]
pub enum ItemMatch {
    Found(EntityId, ParentRef),
    Missing,
    Ambiguous(usize),
}

/// Find an item by id, then by a name that must be unique across the audit
pub fn find_item(state: &AuditState, selector: &str) -> ItemMatch {
    if let Some(location) = state.locate_item(&EntityId::parse(selector)) {
        return ItemMatch::Found(location.item.id.clone(), location.parent());
    }

    let mut matches = Vec::new();
    for property in &state.properties {
        for item in property.items.iter().filter(|i| same_name(&i.name, selector)) {
            matches.push((item.id.clone(), ParentRef::property(property.id.clone())));
        }
    }
    for party in &state.parties {
        for item in party.items.iter().filter(|i| same_name(&i.name, selector)) {
            matches.push((item.id.clone(), ParentRef::party(party.id.clone())));
        }
    }

    match matches.len() {
        0 => ItemMatch::Missing,
        1 => {
            let (id, parent) = matches.remove(0);
            ItemMatch::Found(id, parent)
        },
        n => ItemMatch::Ambiguous(n),
    }
}

fn same_name(name: &str, selector: &str) -> bool {
    name.trim().to_lowercase() == selector.trim().to_lowercase()
}
