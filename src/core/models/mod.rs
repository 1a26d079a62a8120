//! Domain models for ruralaudit
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`AuditState`] - The whole audit tree for one session
//! - [`Property`] / [`Party`] - Entities under audit, each owning a checklist
//! - [`ChecklistItem`] - "Verify this document", with a [`Status`]
//! - [`EntityId`] - Durable or local-origin identifier
//! - [`Notification`] - Derived, human-readable event
//! - [`AnalysisResult`] - Risk verdict

mod analysis;
mod audit;
mod id;
mod item;
mod notification;
mod party;
mod property;
mod status;

pub use analysis::{AnalysisResult, RiskLevel};
pub use audit::{AuditState, ItemLocation, ParentRef, ParentType};
pub use id::{EntityId, EntityKind, LOCAL_MARKER};
pub use item::{ChecklistItem, ItemDraft, ItemPatch, ItemTemplate};
pub use notification::{Notification, NotificationKind};
pub use party::{Party, PartyDraft, PartyKind, PartyPatch, PartyRole};
pub use property::{Property, PropertyDraft, PropertyPatch};
pub use status::Status;
