//! Mock implementations of port traits for testing
//!
//! These mocks provide configurable behavior for unit testing
//! without real I/O operations.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use ruralaudit::core::models::{
    AuditState, ChecklistItem, EntityId, ItemDraft, ItemPatch, ParentRef, Party, PartyDraft,
    PartyPatch, Property, PropertyDraft, PropertyPatch,
};
use ruralaudit::core::ports::{AnalysisError, AuditGateway, CompletionService, GatewayError};

/// Remote store kept in memory, with switchable failure
pub struct InMemoryGateway {
    state: Mutex<AuditState>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::with_state(AuditState::default())
    }

    pub fn with_state(state: AuditState) -> Self {
        Self {
            state: Mutex::new(state),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            failing: AtomicBool::new(false),
        }
    }

    /// A gateway whose every call fails
    pub fn failing() -> Self {
        let gateway = Self::new();
        gateway.set_failing(true);
        gateway
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// What the remote store currently holds
    pub fn remote(&self) -> AuditState {
        self.state.lock().unwrap().clone()
    }

    /// Calls received, e.g. `"update_item i1"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            Err(GatewayError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn mint(&self, prefix: &str) -> EntityId {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        EntityId::durable(format!("{prefix}-{n}"))
    }

    fn items(&self, drafts: &[ItemDraft]) -> Vec<ChecklistItem> {
        drafts
            .iter()
            .cloned()
            .map(|d| ChecklistItem::from_draft(self.mint("item"), d))
            .collect()
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditGateway for InMemoryGateway {
    async fn fetch_all(&self) -> Result<AuditState, GatewayError> {
        self.record("fetch_all".to_string())?;
        Ok(self.remote())
    }

    async fn create_property(&self, draft: &PropertyDraft) -> Result<Property, GatewayError> {
        self.record(format!("create_property {}", draft.name))?;
        let property = Property {
            id: self.mint("prop"),
            name: draft.name.clone(),
            matricula: draft.matricula.clone(),
            cartorio: draft.cartorio.clone(),
            area: draft.area.clone(),
            municipio: draft.municipio.clone(),
            items: self.items(&draft.items),
        };
        self.state.lock().unwrap().properties.push(property.clone());
        Ok(property)
    }

    async fn update_property(&self, id: &EntityId, patch: &PropertyPatch) -> Result<(), GatewayError> {
        self.record(format!("update_property {id}"))?;
        if let Some(property) = self.state.lock().unwrap().property_mut(id) {
            patch.apply(property);
        }
        Ok(())
    }

    async fn delete_property(&self, id: &EntityId) -> Result<(), GatewayError> {
        self.record(format!("delete_property {id}"))?;
        self.state.lock().unwrap().properties.retain(|p| &p.id != id);
        Ok(())
    }

    async fn create_party(&self, draft: &PartyDraft) -> Result<Party, GatewayError> {
        self.record(format!("create_party {}", draft.name))?;
        let party = Party {
            id: self.mint("party"),
            kind: draft.kind,
            name: draft.name.clone(),
            doc: draft.doc.clone(),
            role: draft.role,
            items: self.items(&draft.items),
        };
        self.state.lock().unwrap().parties.push(party.clone());
        Ok(party)
    }

    async fn update_party(&self, id: &EntityId, patch: &PartyPatch) -> Result<(), GatewayError> {
        self.record(format!("update_party {id}"))?;
        if let Some(party) = self.state.lock().unwrap().party_mut(id) {
            patch.apply(party);
        }
        Ok(())
    }

    async fn delete_party(&self, id: &EntityId) -> Result<(), GatewayError> {
        self.record(format!("delete_party {id}"))?;
        self.state.lock().unwrap().parties.retain(|p| &p.id != id);
        Ok(())
    }

    async fn create_item(&self, draft: &ItemDraft, parent: &ParentRef) -> Result<ChecklistItem, GatewayError> {
        self.record(format!("create_item {}", draft.name))?;
        let item = ChecklistItem::from_draft(self.mint("item"), draft.clone());
        if let Some(items) = self.state.lock().unwrap().items_mut(parent) {
            items.push(item.clone());
        }
        Ok(item)
    }

    async fn update_item(&self, id: &EntityId, patch: &ItemPatch) -> Result<(), GatewayError> {
        self.record(format!("update_item {id}"))?;
        if let Some(item) = self.state.lock().unwrap().item_mut(id) {
            patch.apply(item);
        }
        Ok(())
    }

    async fn delete_item(&self, id: &EntityId) -> Result<(), GatewayError> {
        self.record(format!("delete_item {id}"))?;
        let mut state = self.state.lock().unwrap();
        for property in &mut state.properties {
            property.items.retain(|i| &i.id != id);
        }
        for party in &mut state.parties {
            party.items.retain(|i| &i.id != id);
        }
        Ok(())
    }

    async fn update_general_notes(&self, notes: &str) -> Result<(), GatewayError> {
        self.record("update_general_notes".to_string())?;
        self.state.lock().unwrap().general_notes = notes.to_string();
        Ok(())
    }
}

/// Completion service returning a scripted answer
pub struct MockCompletion {
    answer: Result<String, AnalysisError>,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletion {
    pub fn answering(text: &str) -> Self {
        Self {
            answer: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: AnalysisError) -> Self {
        Self {
            answer: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete_structured(
        &self,
        prompt: &str,
        _schema: &serde_json::Value,
    ) -> Result<String, AnalysisError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer.clone()
    }
}
