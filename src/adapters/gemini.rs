//! Gemini structured-completion client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{Value, json};

use crate::core::ports::{AnalysisError, CompletionService};

/// Public Gemini API host
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Model used when none is configured
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Calls `models/{model}:generateContent` with a JSON response schema
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    url: Url,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The URL carries the API key
        f.debug_struct("GeminiClient")
            .field("host", &self.url.host_str())
            .field("path", &self.url.path())
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client; `endpoint` may be a host or a full `:generateContent` URL
    pub fn new(
        api_key: &str,
        model: &str,
        endpoint: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, AnalysisError> {
        if api_key.trim().is_empty() {
            return Err(AnalysisError::MissingApiKey);
        }
        let url = resolve_endpoint(endpoint, model, api_key)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Request(e.to_string()))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete_structured(&self, prompt: &str, schema: &Value) -> Result<String, AnalysisError> {
        let payload = json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt }
                    ]
                }
            ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema
            }
        });

        let response = self
            .client
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| AnalysisError::Request(format!("gemini request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Request(format!(
                "gemini error {status}: {}",
                body.chars().take(320).collect::<String>()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AnalysisError::Request(format!("invalid gemini response: {e}")))?;

        let text = extract_text(&body);
        if text.is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Concatenated text parts of the first candidate
fn extract_text(body: &Value) -> String {
    body["candidates"]
        .as_array()
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate["content"]["parts"].as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn resolve_endpoint(endpoint: Option<&str>, model: &str, api_key: &str) -> Result<Url, AnalysisError> {
    let endpoint = endpoint.unwrap_or(DEFAULT_GEMINI_ENDPOINT);
    let raw = if endpoint.contains(":generateContent") {
        endpoint.to_string()
    } else {
        format!("{}/v1beta/models/{model}:generateContent", endpoint.trim_end_matches('/'))
    };

    let mut url = Url::parse(&raw).map_err(|e| AnalysisError::Request(format!("invalid gemini endpoint {raw}: {e}")))?;
    if !url.query_pairs().any(|(k, _)| k == "key") {
        url.query_pairs_mut().append_pair("key", api_key);
    }
    Ok(url)
}
