// src/config.rs

//! Window configuration.
//!
//! `WindowConfig` can be built in code or deserialized from JSON. Every
//! field has a default, so a config file only needs the settings it changes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial drawable width in pixels.
    pub width: u32,
    /// Initial drawable height in pixels.
    pub height: u32,
    pub title: String,
    /// If true, the default key-press hook closes the window on Escape.
    pub escape_closes: bool,
    /// If true, pointer enter/leave re-arms first-move seeding, so the first
    /// move after re-entering the window also reports a zero delta.
    pub reseed_mouse_on_crossing: bool,
    /// `env_logger` filter used by binaries when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 800,
            height: 600,
            title: "softwin".to_string(),
            escape_closes: true,
            reseed_mouse_on_crossing: false,
            log_filter: "info".to_string(),
        }
    }
}

impl WindowConfig {
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        WindowConfig {
            width,
            height,
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse window config JSON")
    }

    /// Loads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("In config file {}", path.display()))
    }
}
