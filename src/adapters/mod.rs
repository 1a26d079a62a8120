//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `supabase/` - PostgREST gateway and flat record mapping
//! - `gemini` - Structured-completion client for risk analysis
//! - `offline` - Gateway that refuses every call
//!
//! [`gateway_from_config`] and [`analyzer_from_config`] pick the adapters a
//! session runs with.

pub mod gemini;
pub mod offline;
pub mod supabase;

use std::sync::Arc;

use crate::config::Config;
use crate::core::ports::AuditGateway;
use crate::core::services::RiskAnalyzer;

pub use gemini::GeminiClient;
pub use offline::OfflineGateway;
pub use supabase::SupabaseGateway;

/// Gateway for the configured remote store, or the offline one
#[must_use]
pub fn gateway_from_config(config: &Config) -> Arc<dyn AuditGateway> {
    let Some((url, key)) = config.persistence() else {
        log::warn!("Supabase credentials missing, running in offline mode");
        return Arc::new(OfflineGateway);
    };

    match SupabaseGateway::new(url, key, config.timeout()) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            log::warn!("Could not set up the Supabase client ({e}), running in offline mode");
            Arc::new(OfflineGateway)
        },
    }
}

/// Analyzer backed by Gemini when a key is configured
#[must_use]
pub fn analyzer_from_config(config: &Config) -> RiskAnalyzer {
    let Some(key) = config.ai_key() else {
        log::debug!("No AI key configured, risk analysis will use the fallback verdict");
        return RiskAnalyzer::unavailable();
    };

    match GeminiClient::new(key, &config.ai.model, config.ai.endpoint.as_deref(), config.timeout()) {
        Ok(client) => RiskAnalyzer::new(Arc::new(client)),
        Err(e) => {
            log::warn!("Could not set up the AI client: {e}");
            RiskAnalyzer::unavailable()
        },
    }
}
