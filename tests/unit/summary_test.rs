//! Tests for dashboard aggregates

use ruralaudit::core::models::{AuditState, PartyKind, PartyRole, Status};
use ruralaudit::core::services::{filter_parties, group_by_category, summarize};

use crate::common::fixtures::{ItemBuilder, farm_state, full_state, party};

#[test]
fn test_summarize_counts_properties_and_parties() {
    let mut state = full_state();
    state.parties[0].items[0].status = Status::Expired;

    let summary = summarize(&state);

    assert_eq!(summary.total_items, 4);
    assert_eq!(summary.pending, 2);
    assert_eq!(summary.attention, 1);
    assert_eq!(summary.progress, 50);
    assert_eq!(summary.property_pending, 2);
    assert_eq!(summary.party_attention, 1);
}

#[test]
fn test_summarize_per_property_regular_counts() {
    let summary = summarize(&full_state());

    assert_eq!(summary.properties.len(), 2);
    assert_eq!(summary.properties[0].name, "Fazenda Boa Vista");
    assert_eq!((summary.properties[0].regular, summary.properties[0].total), (1, 2));
    assert_eq!((summary.properties[1].regular, summary.properties[1].total), (0, 1));
}

#[test]
fn test_summarize_empty_audit_has_zero_progress() {
    let summary = summarize(&AuditState::default());
    assert_eq!(summary.total_items, 0);
    assert_eq!(summary.progress, 0);
}

#[test]
fn test_progress_rounds() {
    let mut state = farm_state();
    state.properties[0]
        .items
        .push(ItemBuilder::new("i9", "ITR").status(Status::Waiting).build());

    // 2 of 3 items no longer pending
    assert_eq!(summarize(&state).progress, 67);
}

#[test]
fn test_group_by_category_keeps_first_seen_order() {
    let items = vec![
        ItemBuilder::new("a", "Matrícula").category("Registro").status(Status::Ok).build(),
        ItemBuilder::new("b", "CAR").category("Ambiental").status(Status::Issue).build(),
        ItemBuilder::new("c", "Ônus").category("Registro").status(Status::Waived).build(),
        ItemBuilder::new("d", "APP").category("Ambiental").build(),
    ];

    let groups = group_by_category(&items);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].category, "Registro");
    assert_eq!(groups[0].resolved, 2);
    assert_eq!(groups[0].progress, 100);
    assert_eq!(groups[1].category, "Ambiental");
    assert_eq!(groups[1].attention, 1);
    assert_eq!(groups[1].progress, 0);

    let names: Vec<_> = groups[1].items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["CAR", "APP"]);
}

#[test]
fn test_group_by_category_empty() {
    assert!(group_by_category(&[]).is_empty());
}

#[test]
fn test_filter_parties_matches_name_or_doc() {
    let mut parties = vec![
        party("1", "João da Silva", PartyKind::Pf, PartyRole::Seller, Vec::new()),
        party("2", "Agropecuária Horizonte Ltda", PartyKind::Pj, PartyRole::Buyer, Vec::new()),
    ];
    parties[1].doc = "12.345.678/0001-90".to_string();

    let by_name: Vec<_> = filter_parties(&parties, "JOÃO").iter().map(|p| p.name.clone()).collect();
    assert_eq!(by_name, vec!["João da Silva"]);

    let by_doc = filter_parties(&parties, "0001");
    assert_eq!(by_doc.len(), 1);
    assert_eq!(by_doc[0].name, "Agropecuária Horizonte Ltda");

    assert_eq!(filter_parties(&parties, "").len(), 2);
    assert!(filter_parties(&parties, "maria").is_empty());
}
