//! Core domain logic for ruralaudit
//!
//! This module contains the audit logic with no direct I/O.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (AuditState, Property, Party, ChecklistItem)
//! - `services/` - Audit store, fallback, notifications, risk analysis
//! - `ports/` - Trait definitions for the remote store and the AI service

pub mod models;
pub mod ports;
pub mod services;
