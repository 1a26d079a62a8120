//! Party commands

use ruralaudit::config::Config;
use ruralaudit::core::models::{ParentType, PartyDraft, PartyPatch};
use ruralaudit::core::services::templates::{instantiate, party_checklist};
use ruralaudit::core::services::{filter_parties, group_by_category};
use ruralaudit::output::{
    CategoryView, ChecklistView, OperationResult, OutputMode, PartyLine, PartyListResult,
};

use super::session::{Session, find_party};
use crate::cli::PartyAction;

/// Run a party subcommand
pub async fn party(config: &Config, action: PartyAction, mode: OutputMode) -> anyhow::Result<bool> {
    let mut session = Session::open(config).await;

    match action {
        PartyAction::List { search } => {
            let parties = &session.store.state().parties;
            let lines: Vec<PartyLine> = match search.as_deref() {
                Some(query) => filter_parties(parties, query).into_iter().map(PartyLine::from).collect(),
                None => parties.iter().map(PartyLine::from).collect(),
            };
            session.finish(&PartyListResult { parties: lines }, mode).await;
            Ok(true)
        },

        PartyAction::Add {
            kind,
            role,
            name,
            doc,
        } => {
            let draft = PartyDraft {
                kind,
                name: name.unwrap_or_else(|| kind.default_name().to_string()),
                doc: doc.unwrap_or_default(),
                role,
                items: instantiate(party_checklist(kind)),
            };
            let created = session.store.create_party(draft).await;
            let result = OperationResult::ok(format!("Added party {}", created.entity().name))
                .with_id(created.entity().id.clone(), created.is_local());
            session.finish(&result, mode).await;
            Ok(true)
        },

        PartyAction::Show { party } => {
            let id = find_party(session.store.state(), &party);
            let Some(found) = id.and_then(|id| session.store.state().party(&id)) else {
                return session.fail(format!("Party not found: {party}"), mode).await;
            };

            let view = ChecklistView {
                id: found.id.clone(),
                name: found.name.clone(),
                owner: ParentType::Party,
                categories: group_by_category(&found.items)
                    .into_iter()
                    .map(CategoryView::from)
                    .collect(),
            };
            session.finish(&view, mode).await;
            Ok(true)
        },

        PartyAction::Edit {
            party,
            name,
            doc,
            kind,
            role,
        } => {
            let Some(id) = find_party(session.store.state(), &party) else {
                return session.fail(format!("Party not found: {party}"), mode).await;
            };
            let patch = PartyPatch {
                kind,
                name,
                doc,
                role,
            };
            if patch.is_empty() {
                return session.fail("Nothing to change", mode).await;
            }

            session.store.update_party(&id, patch);
            let result = OperationResult::ok("Party updated").with_id(id.clone(), id.is_local());
            session.finish(&result, mode).await;
            Ok(true)
        },

        PartyAction::Remove { party } => {
            let Some(id) = find_party(session.store.state(), &party) else {
                return session.fail(format!("Party not found: {party}"), mode).await;
            };
            session.store.delete_party(&id);
            session.finish(&OperationResult::ok("Party removed"), mode).await;
            Ok(true)
        },
    }
}
