//! Checklist item commands

use ruralaudit::config::Config;
use ruralaudit::core::models::{ItemDraft, ItemPatch, ParentRef};
use ruralaudit::output::{OperationResult, OutputMode};

use super::session::{ItemMatch, Session, find_item, find_party, find_property};
use crate::cli::ItemAction;

/// Run an item subcommand
pub async fn item(config: &Config, action: ItemAction, mode: OutputMode) -> anyhow::Result<bool> {
    let mut session = Session::open(config).await;

    match action {
        ItemAction::Add {
            name,
            category,
            description,
            property,
            party,
        } => {
            let parent = match (property, party) {
                (_, Some(selector)) => find_party(session.store.state(), &selector).map(ParentRef::party),
                (Some(selector), None) => find_property(session.store.state(), &selector).map(ParentRef::property),
                (None, None) => session.store.active_property_id().cloned().map(ParentRef::property),
            };
            let Some(parent) = parent else {
                return session.fail("Owner not found", mode).await;
            };

            let mut draft = ItemDraft::new(category, name);
            draft.description = description;

            match session.store.create_item(&parent, draft).await {
                Ok(created) => {
                    let result = OperationResult::ok(format!("Added item {}", created.entity().name))
                        .with_id(created.entity().id.clone(), created.is_local());
                    session.finish(&result, mode).await;
                    Ok(true)
                },
                Err(e) => session.fail(e.to_string(), mode).await,
            }
        },

        ItemAction::Set {
            item,
            status,
            notes,
        } => {
            let (id, _) = match find_item(session.store.state(), &item) {
                ItemMatch::Found(id, parent) => (id, parent),
                ItemMatch::Missing => return session.fail(format!("Item not found: {item}"), mode).await,
                ItemMatch::Ambiguous(n) => {
                    return session
                        .fail(format!("{n} items are named {item}; use the item id"), mode)
                        .await;
                },
            };

            let patch = ItemPatch {
                status,
                notes,
                ..ItemPatch::default()
            };
            if patch.is_empty() {
                return session.fail("Nothing to change", mode).await;
            }

            session.store.update_item(&id, patch);
            let result = OperationResult::ok("Item updated").with_id(id.clone(), id.is_local());
            session.finish(&result, mode).await;
            Ok(true)
        },

        ItemAction::Remove { item } => {
            let (id, parent) = match find_item(session.store.state(), &item) {
                ItemMatch::Found(id, parent) => (id, parent),
                ItemMatch::Missing => return session.fail(format!("Item not found: {item}"), mode).await,
                ItemMatch::Ambiguous(n) => {
                    return session
                        .fail(format!("{n} items are named {item}; use the item id"), mode)
                        .await;
                },
            };

            session.store.delete_item(&id, &parent);
            session.finish(&OperationResult::ok("Item removed"), mode).await;
            Ok(true)
        },
    }
}
