//! Gateway used when no remote store is configured

use async_trait::async_trait;

use crate::core::models::{
    AuditState, ChecklistItem, EntityId, ItemDraft, ItemPatch, ParentRef, Party, PartyDraft,
    PartyPatch, Property, PropertyDraft, PropertyPatch,
};
use crate::core::ports::{AuditGateway, GatewayError};

/// Refuses every call, so the store runs on local ids only
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGateway;

#[async_trait]
impl AuditGateway for OfflineGateway {
    async fn fetch_all(&self) -> Result<AuditState, GatewayError> {
        Err(GatewayError::Unconfigured)
    }

    async fn create_property(&self, _draft: &PropertyDraft) -> Result<Property, GatewayError> {
        Err(GatewayError::Unconfigured)
    }

    async fn update_property(&self, _id: &EntityId, _patch: &PropertyPatch) -> Result<(), GatewayError> {
        Err(GatewayError::Unconfigured)
    }

    async fn delete_property(&self, _id: &EntityId) -> Result<(), GatewayError> {
        Err(GatewayError::Unconfigured)
    }

    async fn create_party(&self, _draft: &PartyDraft) -> Result<Party, GatewayError> {
        Err(GatewayError::Unconfigured)
    }

    async fn update_party(&self, _id: &EntityId, _patch: &PartyPatch) -> Result<(), GatewayError> {
        Err(GatewayError::Unconfigured)
    }

    async fn delete_party(&self, _id: &EntityId) -> Result<(), GatewayError> {
        Err(GatewayError::Unconfigured)
    }

    async fn create_item(&self, _draft: &ItemDraft, _parent: &ParentRef) -> Result<ChecklistItem, GatewayError> {
        Err(GatewayError::Unconfigured)
    }

    async fn update_item(&self, _id: &EntityId, _patch: &ItemPatch) -> Result<(), GatewayError> {
        Err(GatewayError::Unconfigured)
    }

    async fn delete_item(&self, _id: &EntityId) -> Result<(), GatewayError> {
        Err(GatewayError::Unconfigured)
    }

    async fn update_general_notes(&self, _notes: &str) -> Result<(), GatewayError> {
        Err(GatewayError::Unconfigured)
    }
}
