//! Structured completion port
//!
//! Defines the interface to the external AI service used for risk analysis.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while obtaining a risk verdict
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// No API key configured for the AI service
    #[error("API key is missing")]
    MissingApiKey,

    /// The service call failed
    #[error("completion request failed: {0}")]
    Request(String),

    /// The service answered without any text
    #[error("empty response from AI")]
    EmptyResponse,

    /// The text did not match the verdict schema
    #[error("invalid verdict: {0}")]
    InvalidVerdict(String),
}

/// A stateless prompt-in, JSON-out completion service
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send a prompt constrained by a JSON schema; returns the raw JSON text
    async fn complete_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, AnalysisError>;
}
