//! Assist tuning, read from `~/.config/penmate/config.yaml`
//!
//! Every field is optional in the file; missing fields take their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    /// Chat-completions endpoint
    pub endpoint: String,
    /// Transport timeout for one generation call; `None` waits indefinitely
    pub request_timeout_secs: Option<u64>,
    /// How long a toast stays up
    pub toast_ms: u64,
    /// Delay after a surface loses focus before the trigger is hidden
    pub blur_grace_ms: u64,
    /// Delay after a pointer press on the trigger before the menu is opened
    /// anyway, for pages that swallow the click
    pub pointer_fallback_ms: u64,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
            toast_ms: 3000,
            blur_grace_ms: 200,
            pointer_fallback_ms: 150,
        }
    }
}

impl AssistConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }

    pub fn pointer_fallback(&self) -> Duration {
        Duration::from_millis(self.pointer_fallback_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
