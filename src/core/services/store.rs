//! Audit state store
//!
//! The store owns the session's audit tree and is the only place it is
//! mutated. Every mutation is applied in memory first and never rolled back:
//!
//! - creates wait for the remote store (they need the durable id) and fall
//!   back to local ids when it fails;
//! - updates and deletes are spawned as fire-and-forget writes, tracked until
//!   [`AuditStore::flush`] drains them; a failed write leaves the change
//!   local-only and appends a warning notification.
//!
//! Entities with local-origin ids are never sent to the remote store, since it
//! holds no record for them.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinSet;

use super::fallback::{Persisted, localize_item, localize_party, localize_property, persist_or_local};
use super::notifications::NotificationLog;
use super::risk::{AnalysisOutcome, RiskAnalyzer};
use super::templates::{PROPERTY_CHECKLIST, instantiate, party_checklist};
use crate::core::models::{
    AuditState, ChecklistItem, EntityId, ItemDraft, ItemPatch, NotificationKind, ParentRef, Party,
    PartyDraft, PartyKind, PartyPatch, PartyRole, Property, PropertyDraft, PropertyPatch, Status,
};
use crate::core::ports::{AuditGateway, GatewayError};

/// Name given to the property seeded into an empty audit
pub const DEFAULT_PROPERTY_NAME: &str = "Imóvel Principal";

const UPDATE_NOT_SAVED: &str = "Alteração salva apenas localmente.";
const PROPERTY_DELETE_NOT_SAVED: &str = "Imóvel removido (Localmente).";
const PARTY_DELETE_NOT_SAVED: &str = "Parte removida (Localmente).";
const ITEM_DELETE_NOT_SAVED: &str = "Item removido (Localmente).";

/// Operations the store refuses outright
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The audit must keep at least one property
    #[error("cannot delete the only property of the audit")]
    LastProperty,

    /// No property with this id
    #[error("property '{0}' not found")]
    PropertyNotFound(String),

    /// No property or party with this id
    #[error("parent '{0}' not found")]
    ParentNotFound(String),

    /// Items need a name
    #[error("item name cannot be empty")]
    EmptyItemName,
}

/// The authoritative audit tree of one session
pub struct AuditStore {
    state: AuditState,
    active_property: Option<EntityId>,
    notifications: NotificationLog,
    gateway: Arc<dyn AuditGateway>,
    in_flight: JoinSet<Option<&'static str>>,
    default_property_name: String,
}

impl std::fmt::Debug for AuditStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditStore")
            .field("properties", &self.state.properties.len())
            .field("parties", &self.state.parties.len())
            .field("active_property", &self.active_property)
            .field("notifications", &self.notifications.len())
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl AuditStore {
    /// Create an empty store on top of a gateway
    #[must_use]
    pub fn new(gateway: Arc<dyn AuditGateway>) -> Self {
        Self {
            state: AuditState::default(),
            active_property: None,
            notifications: NotificationLog::new(),
            gateway,
            in_flight: JoinSet::new(),
            default_property_name: DEFAULT_PROPERTY_NAME.to_string(),
        }
    }

    /// Create a store holding an existing tree; the first property is selected
    #[must_use]
    pub fn with_state(gateway: Arc<dyn AuditGateway>, state: AuditState) -> Self {
        let mut store = Self::new(gateway);
        store.active_property = state.properties.first().map(|p| p.id.clone());
        store.state = state;
        store
    }

    /// Override the name of the property seeded into an empty audit
    #[must_use]
    pub fn with_default_property_name(mut self, name: impl Into<String>) -> Self {
        self.default_property_name = name.into();
        self
    }

    // =========================================================================
    // READ ACCESS
    // =========================================================================

    /// The current tree
    #[must_use]
    pub const fn state(&self) -> &AuditState {
        &self.state
    }

    /// A copy of the current tree, for read-only consumers
    #[must_use]
    pub fn snapshot(&self) -> AuditState {
        self.state.clone()
    }

    /// The session's notifications
    #[must_use]
    pub const fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }

    /// The session's notifications, for mark-read and clear
    pub const fn notifications_mut(&mut self) -> &mut NotificationLog {
        &mut self.notifications
    }

    /// Id of the selected property
    #[must_use]
    pub const fn active_property_id(&self) -> Option<&EntityId> {
        self.active_property.as_ref()
    }

    /// The selected property
    #[must_use]
    pub fn active_property(&self) -> Option<&Property> {
        self.active_property.as_ref().and_then(|id| self.state.property(id))
    }

    /// Select a property; returns false when it does not exist
    pub fn select_property(&mut self, id: &EntityId) -> bool {
        if self.state.property(id).is_some() {
            self.active_property = Some(id.clone());
            true
        } else {
            false
        }
    }

    /// Number of remote writes not yet finished
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.in_flight.len()
    }

    // =========================================================================
    // LOAD
    // =========================================================================

    /// Replace the tree with the remote one
    ///
    /// An empty audit is seeded with one property from the property template.
    /// Local entities from earlier in the session are dropped: the remote store
    /// is authoritative on load.
    pub async fn load(&mut self) {
        self.state = self.gateway.load_all().await;
        self.active_property = None;

        if self.state.is_empty() {
            let draft = PropertyDraft::new(
                self.default_property_name.clone(),
                instantiate(PROPERTY_CHECKLIST),
            );
            let result = self.gateway.create_property(&draft).await;
            let created = persist_or_local(result, "default property", move || {
                localize_property(draft)
            });
            if created.is_local() {
                self.notifications.append(
                    "Modo Offline: Dados salvos apenas localmente.",
                    NotificationKind::Warning,
                );
            }
            self.state.properties.push(created.into_inner());
        }

        self.active_property = self.state.properties.first().map(|p| p.id.clone());
        log::debug!(
            "Loaded audit: {} properties, {} parties",
            self.state.properties.len(),
            self.state.parties.len()
        );
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    /// Add a property; it becomes the selected one
    pub async fn create_property(&mut self, draft: PropertyDraft) -> Persisted<Property> {
        let result = self.gateway.create_property(&draft).await;
        let created = persist_or_local(result, "property", move || localize_property(draft));

        if created.is_local() {
            self.notifications
                .append("Novo imóvel adicionado (Localmente).", NotificationKind::Warning);
        } else {
            self.notifications
                .append("Novo imóvel adicionado à auditoria.", NotificationKind::Info);
        }

        let property = created.entity().clone();
        self.active_property = Some(property.id.clone());
        self.state.properties.push(property);
        created
    }

    /// Add a blank property seeded from the property template
    pub async fn new_property(&mut self, name: impl Into<String>) -> Persisted<Property> {
        let draft = PropertyDraft::new(name, instantiate(PROPERTY_CHECKLIST));
        self.create_property(draft).await
    }

    /// Merge fields into a property; returns false when it does not exist
    pub fn update_property(&mut self, id: &EntityId, patch: PropertyPatch) -> bool {
        let Some(property) = self.state.property_mut(id) else {
            return false;
        };
        patch.apply(property);

        if Self::is_remote(id) {
            let gateway = Arc::clone(&self.gateway);
            let id = id.clone();
            self.spawn_write(format!("update property {id}"), UPDATE_NOT_SAVED, async move {
                gateway.update_property(&id, &patch).await
            });
        }
        true
    }

    /// Remove a property and its items
    ///
    /// Refused when it is the only property. If it was selected, the first
    /// remaining property becomes selected.
    pub fn delete_property(&mut self, id: &EntityId) -> Result<(), StoreError> {
        if self.state.properties.len() <= 1 {
            return Err(StoreError::LastProperty);
        }
        let Some(index) = self.state.properties.iter().position(|p| &p.id == id) else {
            return Err(StoreError::PropertyNotFound(id.to_string()));
        };

        self.state.properties.remove(index);
        if self.active_property.as_ref() == Some(id) {
            self.active_property = self.state.properties.first().map(|p| p.id.clone());
        }

        if Self::is_remote(id) {
            let gateway = Arc::clone(&self.gateway);
            let id = id.clone();
            self.spawn_write(format!("delete property {id}"), PROPERTY_DELETE_NOT_SAVED, async move {
                gateway.delete_property(&id).await
            });
        }

        self.notifications
            .append("Imóvel removido da auditoria.", NotificationKind::Info);
        Ok(())
    }

    // =========================================================================
    // PARTIES
    // =========================================================================

    /// Add a party
    pub async fn create_party(&mut self, draft: PartyDraft) -> Persisted<Party> {
        let result = self.gateway.create_party(&draft).await;
        let created = persist_or_local(result, "party", move || localize_party(draft));

        if created.is_local() {
            self.notifications
                .append("Nova parte adicionada (Localmente).", NotificationKind::Warning);
        } else {
            self.notifications.append(
                format!("Nova parte adicionada: {}.", created.entity().name),
                NotificationKind::Info,
            );
        }

        self.state.parties.push(created.entity().clone());
        created
    }

    /// Add a party with a placeholder name, seeded from the PF or PJ template
    pub async fn new_party(&mut self, kind: PartyKind, role: PartyRole) -> Persisted<Party> {
        let draft = PartyDraft {
            kind,
            name: kind.default_name().to_string(),
            doc: String::new(),
            role,
            items: instantiate(party_checklist(kind)),
        };
        self.create_party(draft).await
    }

    /// Merge fields into a party; returns false when it does not exist
    pub fn update_party(&mut self, id: &EntityId, patch: PartyPatch) -> bool {
        let Some(party) = self.state.party_mut(id) else {
            return false;
        };
        patch.apply(party);

        if Self::is_remote(id) {
            let gateway = Arc::clone(&self.gateway);
            let id = id.clone();
            self.spawn_write(format!("update party {id}"), UPDATE_NOT_SAVED, async move {
                gateway.update_party(&id, &patch).await
            });
        }
        true
    }

    /// Remove a party and its items; returns false when it does not exist
    pub fn delete_party(&mut self, id: &EntityId) -> bool {
        let before = self.state.parties.len();
        self.state.parties.retain(|p| &p.id != id);
        if self.state.parties.len() == before {
            return false;
        }

        if Self::is_remote(id) {
            let gateway = Arc::clone(&self.gateway);
            let id = id.clone();
            self.spawn_write(format!("delete party {id}"), PARTY_DELETE_NOT_SAVED, async move {
                gateway.delete_party(&id).await
            });
        }

        self.notifications
            .append("Parte removida da auditoria.", NotificationKind::Info);
        true
    }

    // =========================================================================
    // ITEMS
    // =========================================================================

    /// Append an item to a property's or party's checklist
    pub async fn create_item(
        &mut self,
        parent: &ParentRef,
        draft: ItemDraft,
    ) -> Result<Persisted<ChecklistItem>, StoreError> {
        if draft.name.trim().is_empty() {
            return Err(StoreError::EmptyItemName);
        }
        if !self.state.has_parent(parent) {
            return Err(StoreError::ParentNotFound(parent.id.to_string()));
        }

        let created = if parent.id.is_local() {
            log::debug!("Parent {} is local-only, item stays local", parent.id);
            Persisted::Local(localize_item(draft))
        } else {
            let result = self.gateway.create_item(&draft, parent).await;
            persist_or_local(result, "item", move || localize_item(draft))
        };

        if created.is_local() {
            self.notifications
                .append("Item adicionado (Localmente).", NotificationKind::Warning);
        } else {
            self.notifications.append(
                format!("Novo item \"{}\" adicionado.", created.entity().name),
                NotificationKind::Info,
            );
        }

        if let Some(items) = self.state.items_mut(parent) {
            items.push(created.entity().clone());
        }
        Ok(created)
    }

    /// Merge fields into an item found anywhere in the tree
    ///
    /// A status change to `issue` raises an alert, a change back to `pending`
    /// raises a warning. Only actual transitions notify: setting `issue` on an
    /// item that is already `issue` is silent. Returns false when the item does
    /// not exist.
    pub fn update_item(&mut self, id: &EntityId, mut patch: ItemPatch) -> bool {
        let Some(location) = self.state.locate_item(id) else {
            return false;
        };
        let previous = location.item.status;
        let subject = format!(
            "{} ({}): O item \"{}\"",
            location.parent_type.label(),
            location.owner_name,
            location.item.name
        );

        if patch.records_progress() && patch.updated_at.is_none() {
            patch.updated_at = Some(chrono::Utc::now().to_rfc3339());
        }
        if let Some(item) = self.state.item_mut(id) {
            patch.apply(item);
        }

        match patch.status {
            Some(Status::Issue) if previous != Status::Issue => self.notifications.append(
                format!("{subject} foi marcado como IRREGULARIDADE."),
                NotificationKind::Alert,
            ),
            Some(Status::Pending) if previous != Status::Pending => self.notifications.append(
                format!("{subject} voltou para PENDENTE."),
                NotificationKind::Warning,
            ),
            _ => {},
        }

        if Self::is_remote(id) {
            let gateway = Arc::clone(&self.gateway);
            let id = id.clone();
            self.spawn_write(format!("update item {id}"), UPDATE_NOT_SAVED, async move {
                gateway.update_item(&id, &patch).await
            });
        }
        true
    }

    /// Remove an item from its parent; returns false when it does not exist
    pub fn delete_item(&mut self, id: &EntityId, parent: &ParentRef) -> bool {
        let Some(items) = self.state.items_mut(parent) else {
            return false;
        };
        let before = items.len();
        items.retain(|i| &i.id != id);
        if items.len() == before {
            return false;
        }

        if Self::is_remote(id) {
            let gateway = Arc::clone(&self.gateway);
            let id = id.clone();
            self.spawn_write(format!("delete item {id}"), ITEM_DELETE_NOT_SAVED, async move {
                gateway.delete_item(&id).await
            });
        }

        self.notifications.append("Item removido.", NotificationKind::Info);
        true
    }

    // =========================================================================
    // NOTES & ANALYSIS
    // =========================================================================

    /// Replace the general notes
    pub fn set_general_notes(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.general_notes.clone_from(&text);

        let gateway = Arc::clone(&self.gateway);
        self.spawn_write("update general notes".to_string(), UPDATE_NOT_SAVED, async move {
            gateway.update_general_notes(&text).await
        });
    }

    /// Run a risk analysis over a snapshot of the tree
    pub async fn analyze(&mut self, analyzer: &RiskAnalyzer) -> AnalysisOutcome {
        let snapshot = self.snapshot();
        let outcome = analyzer.analyze(&snapshot).await;

        if outcome.degraded {
            self.notifications
                .append("Erro ao realizar análise de risco.", NotificationKind::Alert);
        } else {
            self.notifications.append(
                "Análise de Risco com IA concluída com sucesso.",
                NotificationKind::Info,
            );
        }
        outcome
    }

    // =========================================================================
    // REMOTE WRITES
    // =========================================================================

    /// Wait for every in-flight remote write
    ///
    /// Each write that failed leaves a warning in the notification log.
    pub async fn flush(&mut self) {
        while let Some(joined) = self.in_flight.join_next().await {
            self.record_write(&joined);
        }
    }

    fn record_write(&mut self, joined: &Result<Option<&'static str>, tokio::task::JoinError>) {
        match joined {
            Ok(Some(notice)) => self.notifications.append(*notice, NotificationKind::Warning),
            Ok(None) => {},
            Err(e) => {
                log::error!("Remote write task aborted: {e}");
                self.notifications
                    .append(UPDATE_NOT_SAVED, NotificationKind::Warning);
            },
        }
    }

    fn is_remote(id: &EntityId) -> bool {
        if id.is_local() {
            log::debug!("Skipping remote write for local-only entity {id}");
        }
        id.is_durable()
    }

    fn spawn_write<F>(&mut self, what: String, notice: &'static str, write: F)
    where
        F: Future<Output = Result<(), GatewayError>> + Send + 'static,
    {
        while let Some(joined) = self.in_flight.try_join_next() {
            self.record_write(&joined);
        }

        self.in_flight.spawn(async move {
            match write.await {
                Ok(()) => None,
                Err(e) => {
                    log::warn!("Remote write failed ({what}): {e}");
                    Some(notice)
                },
            }
        });
    }
}
