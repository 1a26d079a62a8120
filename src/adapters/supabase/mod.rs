//! Supabase (PostgREST) gateway
//!
//! Talks to `{url}/rest/v1/{table}` with the project key in both the `apikey`
//! and `Authorization` headers. Inserts ask for the written rows back so the
//! store learns the durable ids.

pub mod records;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::models::{
    AuditState, ChecklistItem, EntityId, ItemDraft, ItemPatch, ParentRef, Party, PartyDraft,
    PartyPatch, Property, PropertyDraft, PropertyPatch,
};
use crate::core::ports::{AuditGateway, GatewayError};

use records::{
    FlatAudit, ItemPatchRecord, ItemRecord, NewItemRecord, NewPartyRecord, NewPropertyRecord,
    PartyRecord, PropertyRecord, SettingsRecord,
};

const PROPERTIES: &str = "properties";
const PARTIES: &str = "parties";
const ITEMS: &str = "audit_items";
const SETTINGS: &str = "audit_settings";

/// Parents come back in creation order
const PARENT_ORDER: &str = "order=created_at";
/// Items keep insertion order; `id` breaks ties between rows of one batch insert
const ITEM_ORDER: &str = "order=created_at,id";

/// Id of the settings singleton row
const SETTINGS_ROW: u32 = 1;

/// Longest error body kept in a [`GatewayError::Status`]
const MAX_ERROR_BODY: usize = 320;

/// Gateway backed by a Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseGateway {
    client: Client,
    base: String,
    key: String,
}

impl SupabaseGateway {
    /// Build a gateway for the project at `url`
    pub fn new(url: &str, key: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base: format!("{}/rest/v1", url.trim_end_matches('/')),
            key: key.into(),
        })
    }

    fn url(&self, table: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/{table}", self.base)
        } else {
            format!("{}/{table}?{query}", self.base)
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.key))
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, query: &str) -> Result<Vec<T>, GatewayError> {
        let request = self.authorize(self.client.get(self.url(table, query)));
        let response = send(request).await?;
        response.json().await.map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn insert<B, T>(&self, table: &'static str, body: &B) -> Result<Vec<T>, GatewayError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .authorize(self.client.post(self.url(table, "")))
            .header("Prefer", "return=representation")
            .json(body);
        let response = send(request).await?;
        response.json().await.map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn insert_one<B, T>(&self, table: &'static str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.insert::<B, T>(table, body)
            .await?
            .into_iter()
            .next()
            .ok_or(GatewayError::EmptyInsert(table))
    }

    async fn patch<B: Serialize + Sync>(&self, table: &str, query: &str, body: &B) -> Result<(), GatewayError> {
        let request = self.authorize(self.client.patch(self.url(table, query))).json(body);
        send(request).await.map(drop)
    }

    async fn delete(&self, table: &str, query: &str) -> Result<(), GatewayError> {
        let request = self.authorize(self.client.delete(self.url(table, query)));
        send(request).await.map(drop)
    }

    async fn insert_items(&self, drafts: &[ItemDraft], parent: &ParentRef) -> Result<Vec<ChecklistItem>, GatewayError> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<NewItemRecord<'_>> = drafts.iter().map(|d| NewItemRecord::new(d, parent)).collect();
        let inserted: Vec<ItemRecord> = self.insert(ITEMS, rows.as_slice()).await?;
        Ok(inserted.into_iter().map(ChecklistItem::from).collect())
    }

    async fn fetch_settings(&self) -> SettingsRecord {
        let query = format!("id=eq.{SETTINGS_ROW}&select=general_notes");
        match self.select::<SettingsRecord>(SETTINGS, &query).await {
            Ok(rows) => rows.into_iter().next().unwrap_or_default(),
            Err(e) => {
                log::warn!("Could not read audit settings, using empty notes: {e}");
                SettingsRecord::default()
            },
        }
    }
}

#[async_trait]
impl AuditGateway for SupabaseGateway {
    async fn fetch_all(&self) -> Result<AuditState, GatewayError> {
        let properties: Vec<PropertyRecord> = self.select(PROPERTIES, PARENT_ORDER).await?;
        let parties: Vec<PartyRecord> = self.select(PARTIES, PARENT_ORDER).await?;
        let items: Vec<ItemRecord> = self.select(ITEMS, ITEM_ORDER).await?;
        let settings = self.fetch_settings().await;

        log::debug!(
            "Fetched {} properties, {} parties, {} items",
            properties.len(),
            parties.len(),
            items.len()
        );

        Ok(records::assemble(FlatAudit {
            properties,
            parties,
            items,
            settings,
        }))
    }

    async fn create_property(&self, draft: &PropertyDraft) -> Result<Property, GatewayError> {
        let row: PropertyRecord = self.insert_one(PROPERTIES, &NewPropertyRecord::from(draft)).await?;
        let parent = ParentRef::property(row.id.clone());
        let items = self.insert_items(&draft.items, &parent).await?;
        Ok(row.into_property(items))
    }

    async fn update_property(&self, id: &EntityId, patch: &PropertyPatch) -> Result<(), GatewayError> {
        self.patch(PROPERTIES, &id_filter(id), patch).await
    }

    async fn delete_property(&self, id: &EntityId) -> Result<(), GatewayError> {
        self.delete(ITEMS, &parent_filter(id)).await?;
        self.delete(PROPERTIES, &id_filter(id)).await
    }

    async fn create_party(&self, draft: &PartyDraft) -> Result<Party, GatewayError> {
        let row: PartyRecord = self.insert_one(PARTIES, &NewPartyRecord::from(draft)).await?;
        let parent = ParentRef::party(row.id.clone());
        let items = self.insert_items(&draft.items, &parent).await?;
        Ok(row.into_party(items))
    }

    async fn update_party(&self, id: &EntityId, patch: &PartyPatch) -> Result<(), GatewayError> {
        self.patch(PARTIES, &id_filter(id), patch).await
    }

    async fn delete_party(&self, id: &EntityId) -> Result<(), GatewayError> {
        self.delete(ITEMS, &parent_filter(id)).await?;
        self.delete(PARTIES, &id_filter(id)).await
    }

    async fn create_item(&self, draft: &ItemDraft, parent: &ParentRef) -> Result<ChecklistItem, GatewayError> {
        let row: ItemRecord = self.insert_one(ITEMS, &NewItemRecord::new(draft, parent)).await?;
        Ok(row.into())
    }

    async fn update_item(&self, id: &EntityId, patch: &ItemPatch) -> Result<(), GatewayError> {
        self.patch(ITEMS, &id_filter(id), &ItemPatchRecord::from(patch)).await
    }

    async fn delete_item(&self, id: &EntityId) -> Result<(), GatewayError> {
        self.delete(ITEMS, &id_filter(id)).await
    }

    async fn update_general_notes(&self, notes: &str) -> Result<(), GatewayError> {
        let body = SettingsRecord {
            general_notes: notes.to_string(),
        };
        self.patch(SETTINGS, &format!("id=eq.{SETTINGS_ROW}"), &body).await
    }
}

fn id_filter(id: &EntityId) -> String {
    format!("id=eq.{id}")
}

fn parent_filter(id: &EntityId) -> String {
    format!("parent_id=eq.{id}")
}

async fn send(request: RequestBuilder) -> Result<Response, GatewayError> {
    let response = request
        .send()
        .await
        .map_err(|e| GatewayError::Transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::Status {
        status: status.as_u16(),
        message: truncate(&body, MAX_ERROR_BODY),
    })
}

fn truncate(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{truncated}...")
    } else {
        truncated
    }
}
