//! Test fixtures and builders
//!
//! Provides convenient builders for creating test data.

use ruralaudit::core::models::{
    AuditState, ChecklistItem, EntityId, Party, PartyKind, PartyRole, Property, Status,
};

/// Builder for checklist items
pub struct ItemBuilder {
    item: ChecklistItem,
}

impl ItemBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            item: ChecklistItem {
                id: EntityId::durable(id),
                category: "Registro Imobiliário".to_string(),
                name: name.to_string(),
                description: None,
                status: Status::Pending,
                notes: String::new(),
                updated_at: "2024-01-01T00:00:00+00:00".to_string(),
            },
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.item.category = category.to_string();
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.item.status = status;
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.item.notes = notes.to_string();
        self
    }

    pub fn build(self) -> ChecklistItem {
        self.item
    }
}

/// A property with durable ids
pub fn property(id: &str, name: &str, items: Vec<ChecklistItem>) -> Property {
    Property {
        id: EntityId::durable(id),
        name: name.to_string(),
        matricula: "12.345".to_string(),
        cartorio: "1º CRI".to_string(),
        area: "250".to_string(),
        municipio: "Sorriso/MT".to_string(),
        items,
    }
}

/// A party with durable ids
pub fn party(id: &str, name: &str, kind: PartyKind, role: PartyRole, items: Vec<ChecklistItem>) -> Party {
    Party {
        id: EntityId::durable(id),
        kind,
        name: name.to_string(),
        doc: String::new(),
        role,
        items,
    }
}

/// One property "Fazenda Boa Vista" with a pending and a regular item
pub fn farm_state() -> AuditState {
    AuditState {
        properties: vec![property(
            "p1",
            "Fazenda Boa Vista",
            vec![
                ItemBuilder::new("i1", "Certidão de Ônus Reais").build(),
                ItemBuilder::new("i2", "CCIR").category("Cadastro e Fiscal").status(Status::Ok).build(),
            ],
        )],
        parties: Vec::new(),
        general_notes: String::new(),
    }
}

/// Two properties and one seller
pub fn full_state() -> AuditState {
    let mut state = farm_state();
    state.properties.push(property(
        "p2",
        "Sítio Esperança",
        vec![ItemBuilder::new("i3", "CAR - Cadastro Ambiental Rural").category("Ambiental").build()],
    ));
    state.parties.push(party(
        "s1",
        "João da Silva",
        PartyKind::Pf,
        PartyRole::Seller,
        vec![ItemBuilder::new("i4", "CND Federal").category("Certidões").build()],
    ));
    state
}
