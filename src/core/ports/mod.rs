//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the audit logic and the
//! external systems it talks to (the remote store, the AI service).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core depends only on these traits, never on concrete implementations.
//! This enables:
//!
//! - **Testability**: In-memory and failing gateways for unit tests
//! - **Offline mode**: A gateway that always fails stands in for a missing backend
//! - **Clarity**: Clear boundaries between layers

mod completion;
mod gateway;

pub use completion::{AnalysisError, CompletionService};
pub use gateway::{AuditGateway, GatewayError};
