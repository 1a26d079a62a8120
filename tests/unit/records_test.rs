//! Tests for the flat remote record mapping

use ruralaudit::adapters::supabase::records::{
    FlatAudit, ItemRecord, PartyRecord, PropertyRecord, SettingsRecord, assemble, flatten,
};
use ruralaudit::core::models::{AuditState, ParentType, PartyKind, PartyRole, Status};

use crate::common::fixtures::{ItemBuilder, farm_state, full_state, party};

#[test]
fn test_flatten_assemble_round_trip() {
    let mut state = full_state();
    state.general_notes = "Imóvel arrendado até 2026".to_string();

    assert_eq!(assemble(flatten(&state)), state);
}

#[test]
fn test_round_trip_empty_state() {
    let state = AuditState::default();
    assert_eq!(assemble(flatten(&state)), state);
}

#[test]
fn test_flatten_tags_parents() {
    let flat = flatten(&full_state());

    assert_eq!(flat.properties.len(), 2);
    assert_eq!(flat.parties.len(), 1);
    assert_eq!(flat.items.len(), 4);

    let party_items: Vec<_> = flat
        .items
        .iter()
        .filter(|i| i.parent_type == ParentType::Party)
        .collect();
    assert_eq!(party_items.len(), 1);
    assert_eq!(party_items[0].parent_id, "s1");
}

#[test]
fn test_assemble_preserves_row_order() {
    let mut state = farm_state();
    state.properties[0].items.reverse();
    let flat = flatten(&state);

    let names: Vec<_> = assemble(flat).properties[0]
        .items
        .iter()
        .map(|i| i.name.clone())
        .collect();
    assert_eq!(names, vec!["CCIR", "Certidão de Ônus Reais"]);
}

#[test]
fn test_same_id_in_both_tables_does_not_mix() {
    let mut state = farm_state();
    state.parties.push(party(
        "p1",
        "Agropecuária Ltda",
        PartyKind::Pj,
        PartyRole::Buyer,
        vec![ItemBuilder::new("x1", "Contrato Social").build()],
    ));

    let rebuilt = assemble(flatten(&state));
    assert_eq!(rebuilt.properties[0].items.len(), 2);
    assert_eq!(rebuilt.parties[0].items.len(), 1);
}

#[test]
fn test_decode_postgrest_rows() {
    let properties: Vec<PropertyRecord> = serde_json::from_str(
        r#"[{"id":"3f1c","name":"Fazenda","matricula":"1","cartorio":"CRI","area":"10","municipio":"Rio Verde","created_at":"2024-05-01T10:00:00Z"}]"#,
    )
    .unwrap();
    let parties: Vec<PartyRecord> = serde_json::from_str(
        r#"[{"id":"9a","type":"PF","name":"Ana","doc":"123","role":"seller"}]"#,
    )
    .unwrap();
    let items: Vec<ItemRecord> = serde_json::from_str(
        r#"[{"id":"it1","parent_id":"3f1c","parent_type":"property","category":"Registro","name":"Matrícula","status":"ok","notes":"","updatedAt":"2024-05-02T00:00:00Z"},
            {"id":"it2","parent_id":"9a","parent_type":"party","category":"Certidões","name":"CNDT"}]"#,
    )
    .unwrap();

    let state = assemble(FlatAudit {
        properties,
        parties,
        items,
        settings: SettingsRecord::default(),
    });

    assert_eq!(state.properties[0].items[0].name, "Matrícula");
    assert_eq!(state.properties[0].items[0].updated_at, "2024-05-02T00:00:00Z");
    assert_eq!(state.parties[0].items[0].name, "CNDT");
    assert_eq!(state.parties[0].items[0].status, Status::Pending);
    assert!(state.general_notes.is_empty());
}
