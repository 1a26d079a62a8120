//! Global configuration management
//!
//! Config is stored at `~/.config/ruralaudit/config.toml`. Credentials may also
//! come from the environment, which wins over the file:
//!
//! | Variable                      | Setting          |
//! |-------------------------------|------------------|
//! | `SUPABASE_URL`                | `supabase.url`   |
//! | `SUPABASE_KEY`                | `supabase.key`   |
//! | `API_KEY` or `GEMINI_API_KEY` | `ai.api_key`     |

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::adapters::gemini::DEFAULT_GEMINI_MODEL;
use crate::core::services::DEFAULT_PROPERTY_NAME;
use crate::paths;

/// Commented starting point written by `ruralaudit init`
pub const CONFIG_TEMPLATE: &str = r#"# ruralaudit configuration

[supabase]
# url = "https://your-project.supabase.co"
# key = "your-anon-key"

[ai]
# api_key = "your-gemini-key"
model = "gemini-3-flash-preview"

[http]
timeout_secs = 30

[audit]
default_property_name = "Imóvel Principal"
"#;

/// ruralaudit configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Remote store credentials
    #[serde(default)]
    pub supabase: SupabaseConfig,
    /// AI service settings
    #[serde(default)]
    pub ai: AiConfig,
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Audit defaults
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Remote store credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Project API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// AI service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Override for the API host or the full `generateContent` URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: None,
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Audit defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Name of the property seeded into an empty audit
    #[serde(default = "default_property_name")]
    pub default_property_name: String,
}

fn default_property_name() -> String {
    DEFAULT_PROPERTY_NAME.to_string()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            default_property_name: default_property_name(),
        }
    }
}

impl Config {
    /// Get the config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::global_config()
    }

    /// Load config from `path`, or the global file, then apply the environment
    ///
    /// A missing global file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::load_from(&path)?
                } else {
                    log::debug!("No config at {}, using defaults", path.display());
                    Self::default()
                }
            },
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Parse a config file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Write the commented template, creating parent directories
    pub fn write_template(path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, CONFIG_TEMPLATE)?;
        Ok(())
    }

    /// Overlay credentials from a variable lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup("SUPABASE_URL") {
            self.supabase.url = Some(url);
        }
        if let Some(key) = lookup("SUPABASE_KEY") {
            self.supabase.key = Some(key);
        }
        if let Some(key) = lookup("API_KEY").or_else(|| lookup("GEMINI_API_KEY")) {
            self.ai.api_key = Some(key);
        }
    }

    /// Remote store URL and key, when both are set
    #[must_use]
    pub fn persistence(&self) -> Option<(&str, &str)> {
        let url = self.supabase.url.as_deref().filter(|s| !s.trim().is_empty())?;
        let key = self.supabase.key.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((url, key))
    }

    /// Whether a remote store is configured
    #[must_use]
    pub fn has_persistence(&self) -> bool {
        self.persistence().is_some()
    }

    /// AI key, when set
    #[must_use]
    pub fn ai_key(&self) -> Option<&str> {
        self.ai.api_key.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// HTTP timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}
