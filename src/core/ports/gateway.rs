//! Persistence gateway port
//!
//! Defines the interface to the remote tabular store that holds the audit.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::models::{
    AuditState, ChecklistItem, EntityId, ItemDraft, ItemPatch, ParentRef, Party, PartyDraft,
    PartyPatch, Property, PropertyDraft, PropertyPatch,
};

/// Errors raised by a persistence gateway
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// No credentials were configured for the remote store
    #[error("remote store is not configured")]
    Unconfigured,

    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote store answered with a non-success status
    #[error("remote store returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        message: String,
    },

    /// The response body could not be decoded
    #[error("invalid response: {0}")]
    Decode(String),

    /// An insert returned no rows
    #[error("insert into {0} returned no rows")]
    EmptyInsert(&'static str),
}

/// Gateway to the remote audit store
///
/// Implementations map the nested audit tree onto flat remote records. Every
/// call may fail; the audit store decides what a failure means for the session.
#[async_trait]
pub trait AuditGateway: Send + Sync {
    /// Load the whole tree
    ///
    /// Implementations fail as a whole when any of the entity collections
    /// cannot be read; they never return a partially populated tree.
    async fn fetch_all(&self) -> Result<AuditState, GatewayError>;

    /// Insert a property, then its seed items; returns it with durable ids
    async fn create_property(&self, draft: &PropertyDraft) -> Result<Property, GatewayError>;

    /// Write the given property fields
    async fn update_property(&self, id: &EntityId, patch: &PropertyPatch)
    -> Result<(), GatewayError>;

    /// Delete a property's items, then the property
    async fn delete_property(&self, id: &EntityId) -> Result<(), GatewayError>;

    /// Insert a party, then its seed items; returns it with durable ids
    async fn create_party(&self, draft: &PartyDraft) -> Result<Party, GatewayError>;

    /// Write the given party fields
    async fn update_party(&self, id: &EntityId, patch: &PartyPatch) -> Result<(), GatewayError>;

    /// Delete a party's items, then the party
    async fn delete_party(&self, id: &EntityId) -> Result<(), GatewayError>;

    /// Insert a single item under a parent
    async fn create_item(
        &self,
        draft: &ItemDraft,
        parent: &ParentRef,
    ) -> Result<ChecklistItem, GatewayError>;

    /// Write the given item fields
    async fn update_item(&self, id: &EntityId, patch: &ItemPatch) -> Result<(), GatewayError>;

    /// Delete a single item
    async fn delete_item(&self, id: &EntityId) -> Result<(), GatewayError>;

    /// Replace the general notes held in the settings record
    async fn update_general_notes(&self, notes: &str) -> Result<(), GatewayError>;

    /// Load the whole tree, degrading to an empty tree on any failure
    async fn load_all(&self) -> AuditState {
        match self.fetch_all().await {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Remote fetch failed, starting from an empty audit: {e}");
                AuditState::default()
            },
        }
    }
}
