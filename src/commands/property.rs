//! Property commands

use ruralaudit::config::Config;
use ruralaudit::core::models::{ParentType, PropertyDraft, PropertyPatch};
use ruralaudit::core::services::templates::{PROPERTY_CHECKLIST, instantiate};
use ruralaudit::core::services::{group_by_category, summarize};
use ruralaudit::output::{
    CategoryView, ChecklistView, OperationResult, OutputMode, PropertyListResult,
};

use super::session::{Session, find_property};
use crate::cli::{PropertyAction, PropertyFields};

/// Run a property subcommand
pub async fn property(config: &Config, action: PropertyAction, mode: OutputMode) -> anyhow::Result<bool> {
    let mut session = Session::open(config).await;

    match action {
        PropertyAction::List => {
            let result = PropertyListResult {
                active: session.store.active_property_id().cloned(),
                properties: summarize(session.store.state()).properties,
            };
            session.finish(&result, mode).await;
            Ok(true)
        },

        PropertyAction::Add { name, fields } => {
            let mut draft = PropertyDraft::new(name, instantiate(PROPERTY_CHECKLIST));
            draft.matricula = fields.matricula.unwrap_or_default();
            draft.cartorio = fields.cartorio.unwrap_or_default();
            draft.area = fields.area.unwrap_or_default();
            draft.municipio = fields.municipio.unwrap_or_default();

            let created = session.store.create_property(draft).await;
            let result = OperationResult::ok(format!("Added property {}", created.entity().name))
                .with_id(created.entity().id.clone(), created.is_local());
            session.finish(&result, mode).await;
            Ok(true)
        },

        PropertyAction::Show { property } => {
            let id = match property {
                Some(selector) => find_property(session.store.state(), &selector),
                None => session.store.active_property_id().cloned(),
            };
            let Some(found) = id.and_then(|id| session.store.state().property(&id)) else {
                return session.fail("Property not found", mode).await;
            };

            let view = ChecklistView {
                id: found.id.clone(),
                name: found.name.clone(),
                owner: ParentType::Property,
                categories: group_by_category(&found.items)
                    .into_iter()
                    .map(CategoryView::from)
                    .collect(),
            };
            session.finish(&view, mode).await;
            Ok(true)
        },

        PropertyAction::Edit {
            property,
            name,
            fields,
        } => {
            let Some(id) = find_property(session.store.state(), &property) else {
                return session.fail(format!("Property not found: {property}"), mode).await;
            };
            let patch = patch_from(name, fields);
            if patch.is_empty() {
                return session.fail("Nothing to change", mode).await;
            }

            session.store.update_property(&id, patch);
            let result = OperationResult::ok("Property updated").with_id(id.clone(), id.is_local());
            session.finish(&result, mode).await;
            Ok(true)
        },

        PropertyAction::Remove { property } => {
            let Some(id) = find_property(session.store.state(), &property) else {
                return session.fail(format!("Property not found: {property}"), mode).await;
            };

            match session.store.delete_property(&id) {
                Ok(()) => {
                    session.finish(&OperationResult::ok("Property removed"), mode).await;
                    Ok(true)
                },
                Err(e) => session.fail(e.to_string(), mode).await,
            }
        },
    }
}

fn patch_from(name: Option<String>, fields: PropertyFields) -> PropertyPatch {
    PropertyPatch {
        name,
        matricula: fields.matricula,
        cartorio: fields.cartorio,
        area: fields.area,
        municipio: fields.municipio,
    }
}
