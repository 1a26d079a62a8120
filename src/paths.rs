//! Centralized path definitions for ruralaudit
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.config/ruralaudit/
//! └── config.toml               # Remote store and AI credentials
//! ```
//!
//! The audit itself lives in the remote store; nothing else is written locally.

use std::path::PathBuf;

/// Global config directory, relative to the home directory
const GLOBAL_DIR: &str = ".config/ruralaudit";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global ruralaudit directory.
///
/// Returns `~/.config/ruralaudit/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.config/ruralaudit/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
