//! Audit services
//!
//! - [`store`] - The session's audit tree and every mutation on it
//! - [`fallback`] - Local ids for creates the remote store did not take
//! - [`notifications`] - Session notification log
//! - [`risk`] - Prompt building and verdict parsing for risk analysis
//! - [`summary`] - Dashboard aggregates
//! - [`templates`] - Seed checklists

pub mod fallback;
pub mod notifications;
pub mod risk;
pub mod store;
pub mod summary;
pub mod templates;

pub use fallback::Persisted;
pub use notifications::NotificationLog;
pub use risk::{AnalysisOutcome, RiskAnalyzer};
pub use store::{AuditStore, DEFAULT_PROPERTY_NAME, StoreError};
pub use summary::{AuditSummary, CategoryGroup, PropertyProgress, filter_parties, group_by_category, summarize};
