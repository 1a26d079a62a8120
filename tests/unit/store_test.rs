//! Tests for the audit store
//!
//! Each test runs the store against the in-memory gateway. Updates and deletes
//! are fire-and-forget, so tests call `flush()` before looking at the remote.

use std::sync::Arc;

use ruralaudit::adapters::OfflineGateway;
use ruralaudit::core::models::{
    EntityId, ItemDraft, ItemPatch, NotificationKind, ParentRef, PartyKind, PartyRole, PropertyPatch,
    Status,
};
use ruralaudit::core::ports::AnalysisError;
use ruralaudit::core::services::{AuditStore, DEFAULT_PROPERTY_NAME, RiskAnalyzer, StoreError};

use crate::common::fixtures::{farm_state, full_state};
use crate::common::mocks::{InMemoryGateway, MockCompletion};

fn store_on(gateway: &Arc<InMemoryGateway>) -> AuditStore {
    AuditStore::with_state(gateway.clone(), gateway.remote())
}

fn statuses(store: &AuditStore, property: usize) -> Vec<Status> {
    store.state().properties[property].items.iter().map(|i| i.status).collect()
}

// =============================================================================
// LOAD
// =============================================================================

#[tokio::test]
async fn test_load_empty_seeds_default_property() {
    let gateway = Arc::new(InMemoryGateway::new());
    let mut store = AuditStore::new(gateway.clone());

    store.load().await;

    let state = store.state();
    assert_eq!(state.properties.len(), 1);
    assert_eq!(state.properties[0].name, DEFAULT_PROPERTY_NAME);
    assert!(!state.properties[0].items.is_empty());
    assert!(state.properties[0].id.is_durable());
    assert_eq!(store.active_property_id(), Some(&state.properties[0].id));
    assert!(store.notifications().is_empty());
    assert_eq!(gateway.remote().properties.len(), 1);
}

#[tokio::test]
async fn test_load_keeps_remote_tree() {
    let gateway = Arc::new(InMemoryGateway::with_state(full_state()));
    let mut store = AuditStore::new(gateway.clone());

    store.load().await;

    assert_eq!(store.state(), &full_state());
    assert_eq!(store.active_property_id(), Some(&EntityId::durable("p1")));
}

#[tokio::test]
async fn test_load_offline_seeds_local_property_with_warning() {
    let mut store = AuditStore::new(Arc::new(OfflineGateway)).with_default_property_name("Fazenda Nova");

    store.load().await;

    let property = &store.state().properties[0];
    assert_eq!(property.name, "Fazenda Nova");
    assert!(property.id.is_local());
    assert!(property.id.as_str().starts_with("loc-"));
    assert!(property.items.iter().all(|i| i.id.as_str().starts_with("loc-item-")));

    let entries = store.notifications().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "Modo Offline: Dados salvos apenas localmente.");
    assert_eq!(entries[0].kind, NotificationKind::Warning);
}

#[tokio::test]
async fn test_load_replaces_previous_tree() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = AuditStore::new(gateway.clone());
    store.load().await;
    gateway.set_failing(true);
    store.new_party(PartyKind::Pf, PartyRole::Buyer).await;
    gateway.set_failing(false);

    store.load().await;

    assert!(store.state().parties.is_empty());
}

// =============================================================================
// SCENARIO
// =============================================================================

#[tokio::test]
async fn test_issue_scenario_and_last_property_guard() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    let item1 = EntityId::durable("i1");

    assert!(store.update_item(&item1, ItemPatch::status(Status::Issue)));
    assert_eq!(statuses(&store, 0), vec![Status::Issue, Status::Ok]);

    let alerts: Vec<_> = store
        .notifications()
        .entries()
        .iter()
        .filter(|n| n.kind == NotificationKind::Alert)
        .collect();
    assert_eq!(alerts.len(), 1);
    assert_eq!(
        alerts[0].message,
        "Imóvel (Fazenda Boa Vista): O item \"Certidão de Ônus Reais\" foi marcado como IRREGULARIDADE."
    );

    let before = store.state().properties.clone();
    assert_eq!(store.delete_property(&EntityId::durable("p1")), Err(StoreError::LastProperty));
    assert_eq!(store.state().properties, before);

    store.flush().await;
    assert!(!gateway.calls().iter().any(|c| c.starts_with("delete_property")));
    assert_eq!(gateway.remote().properties[0].items[0].status, Status::Issue);
}

// =============================================================================
// ITEMS
// =============================================================================

#[tokio::test]
async fn test_status_to_pending_warns_once() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    let item2 = EntityId::durable("i2");

    store.update_item(&item2, ItemPatch::status(Status::Pending));
    store.update_item(&item2, ItemPatch::status(Status::Pending));

    let warnings = store.notifications().count_kind(NotificationKind::Warning);
    assert_eq!(warnings, 1);
    assert_eq!(
        store.notifications().entries()[0].message,
        "Imóvel (Fazenda Boa Vista): O item \"CCIR\" voltou para PENDENTE."
    );
    store.flush().await;
}

#[tokio::test]
async fn test_repeated_issue_does_not_realert() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    let item1 = EntityId::durable("i1");

    store.update_item(&item1, ItemPatch::status(Status::Issue));
    store.update_item(&item1, ItemPatch::notes("Penhora averbada"));
    store.update_item(&item1, ItemPatch::status(Status::Issue));

    assert_eq!(store.notifications().count_kind(NotificationKind::Alert), 1);
    store.flush().await;
}

#[tokio::test]
async fn test_party_item_alert_names_party() {
    let gateway = Arc::new(InMemoryGateway::with_state(full_state()));
    let mut store = store_on(&gateway);

    store.update_item(&EntityId::durable("i4"), ItemPatch::status(Status::Issue));

    assert_eq!(
        store.notifications().entries()[0].message,
        "Parte (João da Silva): O item \"CND Federal\" foi marcado como IRREGULARIDADE."
    );
    store.flush().await;
}

#[tokio::test]
async fn test_progress_patch_stamps_updated_at() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    let item1 = EntityId::durable("i1");

    store.update_item(&item1, ItemPatch::notes("Solicitada ao cartório"));

    let item = store.state().properties[0].item(&item1).unwrap();
    assert_eq!(item.notes, "Solicitada ao cartório");
    assert_ne!(item.updated_at, "2024-01-01T00:00:00+00:00");
    store.flush().await;
}

#[tokio::test]
async fn test_unknown_item_update_is_noop() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);

    assert!(!store.update_item(&EntityId::durable("nope"), ItemPatch::status(Status::Issue)));

    store.flush().await;
    assert_eq!(store.state(), &farm_state());
    assert!(store.notifications().is_empty());
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_update_failure_keeps_memory_state() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    gateway.set_failing(true);

    store.update_item(&EntityId::durable("i1"), ItemPatch::status(Status::Waiting));
    store.flush().await;

    assert_eq!(statuses(&store, 0), vec![Status::Waiting, Status::Ok]);
    assert_eq!(gateway.remote().properties[0].items[0].status, Status::Pending);
    assert_eq!(store.notifications().count_kind(NotificationKind::Warning), 1);
    assert_eq!(
        store.notifications().entries()[0].message,
        "Alteração salva apenas localmente."
    );
}

#[tokio::test]
async fn test_delete_failure_warns_and_keeps_removal() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    gateway.set_failing(true);

    assert!(store.delete_item(
        &EntityId::durable("i2"),
        &ParentRef::property(EntityId::durable("p1"))
    ));
    store.flush().await;

    assert_eq!(statuses(&store, 0), vec![Status::Pending]);
    assert_eq!(gateway.remote().properties[0].items.len(), 2);
    let messages: Vec<_> = store.notifications().entries().iter().map(|n| n.message.as_str()).collect();
    assert_eq!(messages, vec!["Item removido (Localmente).", "Item removido."]);
}

#[tokio::test]
async fn test_successful_writes_add_no_warning() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);

    store.update_item(&EntityId::durable("i2"), ItemPatch::notes("quitado"));
    store.set_general_notes("Pagamento à vista");
    store.flush().await;

    assert_eq!(store.notifications().count_kind(NotificationKind::Warning), 0);
}

#[tokio::test]
async fn test_create_item_appends_in_order() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    let parent = ParentRef::property(EntityId::durable("p1"));

    let created = store
        .create_item(&parent, ItemDraft::new("Ambiental", "Licença de Operação"))
        .await
        .unwrap();

    assert!(!created.is_local());
    let names: Vec<_> = store.state().properties[0].items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Certidão de Ônus Reais", "CCIR", "Licença de Operação"]);
    assert_eq!(
        store.notifications().entries()[0].message,
        "Novo item \"Licença de Operação\" adicionado."
    );
}

#[tokio::test]
async fn test_create_item_rejects_blank_name_and_unknown_parent() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);

    let blank = store
        .create_item(&ParentRef::property(EntityId::durable("p1")), ItemDraft::new("X", "   "))
        .await;
    assert_eq!(blank.unwrap_err(), StoreError::EmptyItemName);

    let orphan = store
        .create_item(&ParentRef::party(EntityId::durable("p1")), ItemDraft::new("X", "Y"))
        .await;
    assert_eq!(orphan.unwrap_err(), StoreError::ParentNotFound("p1".to_string()));

    assert_eq!(store.state(), &farm_state());
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_create_item_falls_back_to_local_id() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    gateway.set_failing(true);

    let created = store
        .create_item(&ParentRef::property(EntityId::durable("p1")), ItemDraft::new("X", "Laudo"))
        .await
        .unwrap();

    assert!(created.is_local());
    assert!(created.entity().id.as_str().starts_with("loc-item-"));
    assert_eq!(store.state().properties[0].items.len(), 3);
    assert_eq!(store.notifications().entries()[0].message, "Item adicionado (Localmente).");
}

#[tokio::test]
async fn test_delete_item() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    let parent = ParentRef::property(EntityId::durable("p1"));

    assert!(store.delete_item(&EntityId::durable("i1"), &parent));
    assert!(!store.delete_item(&EntityId::durable("i1"), &parent));
    store.flush().await;

    assert_eq!(store.state().properties[0].items.len(), 1);
    assert_eq!(gateway.remote().properties[0].items.len(), 1);
    assert_eq!(store.notifications().count_kind(NotificationKind::Info), 1);
}

// =============================================================================
// PROPERTIES & PARTIES
// =============================================================================

#[tokio::test]
async fn test_create_property_selects_it() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);

    let created = store.new_property("Fazenda Santa Rita").await;

    assert!(!created.is_local());
    assert_eq!(store.active_property().map(|p| p.name.as_str()), Some("Fazenda Santa Rita"));
    assert_eq!(store.notifications().entries()[0].message, "Novo imóvel adicionado à auditoria.");
}

#[tokio::test]
async fn test_create_property_offline_is_visible_immediately() {
    let gateway = Arc::new(InMemoryGateway::failing());
    let mut store = AuditStore::new(gateway.clone());

    let created = store.new_property("Fazenda Local").await;

    assert!(created.is_local());
    assert_eq!(store.state().properties.len(), 1);
    assert!(store.state().properties[0].id.is_local());
    assert_eq!(store.notifications().entries()[0].message, "Novo imóvel adicionado (Localmente).");
}

#[tokio::test]
async fn test_delete_selected_property_reselects_first() {
    let gateway = Arc::new(InMemoryGateway::with_state(full_state()));
    let mut store = store_on(&gateway);
    let p2 = EntityId::durable("p2");
    assert!(store.select_property(&p2));

    store.delete_property(&p2).unwrap();
    store.flush().await;

    assert_eq!(store.active_property_id(), Some(&EntityId::durable("p1")));
    assert_eq!(gateway.remote().properties.len(), 1);
    assert_eq!(store.notifications().entries()[0].message, "Imóvel removido da auditoria.");
}

#[tokio::test]
async fn test_delete_unknown_property() {
    let gateway = Arc::new(InMemoryGateway::with_state(full_state()));
    let mut store = store_on(&gateway);

    let result = store.delete_property(&EntityId::durable("ghost"));

    assert_eq!(result, Err(StoreError::PropertyNotFound("ghost".to_string())));
    assert_eq!(store.state().properties.len(), 2);
}

#[tokio::test]
async fn test_update_property_merges_fields() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    let patch = PropertyPatch {
        area: Some("312,5".to_string()),
        ..PropertyPatch::default()
    };

    assert!(store.update_property(&EntityId::durable("p1"), patch));
    store.flush().await;

    let property = &store.state().properties[0];
    assert_eq!(property.area, "312,5");
    assert_eq!(property.matricula, "12.345");
    assert_eq!(gateway.remote().properties[0].area, "312,5");
}

#[tokio::test]
async fn test_new_party_uses_template_and_placeholder_name() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);

    let pj = store.new_party(PartyKind::Pj, PartyRole::Buyer).await;

    assert_eq!(pj.entity().name, "Razão Social");
    assert!(!pj.entity().items.is_empty());
    assert!(pj.entity().items.iter().all(|i| i.status == Status::Pending));
    assert_eq!(store.notifications().entries()[0].message, "Nova parte adicionada: Razão Social.");
}

#[tokio::test]
async fn test_new_party_offline_has_local_ids() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    gateway.set_failing(true);

    let party = store.new_party(PartyKind::Pf, PartyRole::Seller).await;

    assert!(party.is_local());
    assert!(party.entity().id.as_str().starts_with("loc-party-"));
    assert_eq!(store.state().parties.len(), 1);
    assert_eq!(store.notifications().entries()[0].message, "Nova parte adicionada (Localmente).");
}

#[tokio::test]
async fn test_local_entities_are_not_written_remotely() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    gateway.set_failing(true);
    let party = store.new_party(PartyKind::Pf, PartyRole::Seller).await.into_inner();
    gateway.set_failing(false);

    let item = party.items[0].id.clone();
    store.update_item(&item, ItemPatch::status(Status::Ok));
    let created = store
        .create_item(&ParentRef::party(party.id.clone()), ItemDraft::new("Extra", "Procuração"))
        .await
        .unwrap();
    assert!(store.delete_party(&party.id));
    store.flush().await;

    assert!(created.is_local());
    assert_eq!(gateway.calls(), vec!["create_party Nome da Pessoa".to_string()]);
}

#[tokio::test]
async fn test_delete_party() {
    let gateway = Arc::new(InMemoryGateway::with_state(full_state()));
    let mut store = store_on(&gateway);

    assert!(store.delete_party(&EntityId::durable("s1")));
    assert!(!store.delete_party(&EntityId::durable("s1")));
    store.flush().await;

    assert!(store.state().parties.is_empty());
    assert!(gateway.remote().parties.is_empty());
    assert_eq!(store.notifications().entries()[0].message, "Parte removida da auditoria.");
}

// =============================================================================
// NOTES & ANALYSIS
// =============================================================================

#[tokio::test]
async fn test_general_notes_reach_remote() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);

    store.set_general_notes("Vendedor casado em comunhão universal");
    store.flush().await;

    assert_eq!(store.state().general_notes, "Vendedor casado em comunhão universal");
    assert_eq!(gateway.remote().general_notes, "Vendedor casado em comunhão universal");
}

#[tokio::test]
async fn test_analyze_success_notifies_info() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    let completion = Arc::new(MockCompletion::answering(
        r#"{"riskLevel":"Baixo","summary":"Documentação regular","recommendations":[]}"#,
    ));

    let outcome = store.analyze(&RiskAnalyzer::new(completion.clone())).await;

    assert!(!outcome.degraded);
    assert_eq!(outcome.result.summary, "Documentação regular");
    assert_eq!(completion.prompts().len(), 1);
    assert_eq!(
        store.notifications().entries()[0].message,
        "Análise de Risco com IA concluída com sucesso."
    );
}

#[tokio::test]
async fn test_analyze_failure_alerts_and_falls_back() {
    let gateway = Arc::new(InMemoryGateway::with_state(farm_state()));
    let mut store = store_on(&gateway);
    let completion = Arc::new(MockCompletion::failing(AnalysisError::Request("timeout".to_string())));

    let outcome = store.analyze(&RiskAnalyzer::new(completion)).await;

    assert!(outcome.degraded);
    assert_eq!(outcome.result, ruralaudit::core::models::AnalysisResult::fallback());
    assert_eq!(store.notifications().entries()[0].message, "Erro ao realizar análise de risco.");
    assert_eq!(store.notifications().entries()[0].kind, NotificationKind::Alert);
}
