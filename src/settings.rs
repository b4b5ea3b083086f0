//! User settings read from the extension's key-value store
//!
//! Recognized keys: `apiKey`, `model`, `tone`. The assist core only reads
//! the credential and the model; `tone` is carried for the settings page.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const API_KEY: &str = "apiKey";
pub const MODEL: &str = "model";
pub const TONE: &str = "tone";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TONE: &str = "professional";

/// Key-value settings collaborator
pub trait SettingsStore {
    /// Values for the requested keys; absent keys are simply missing
    fn get(&self, keys: &[&str]) -> Result<HashMap<String, String>>;

    fn set(&mut self, pairs: &[(&str, &str)]) -> Result<()>;
}

/// Snapshot of the settings relevant to generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub tone: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            tone: DEFAULT_TONE.to_string(),
        }
    }
}

impl Settings {
    /// Read all recognized keys, applying defaults
    pub fn load(store: &dyn SettingsStore) -> Result<Self> {
        let values = store
            .get(&[API_KEY, MODEL, TONE])
            .context("Failed to read settings")?;
        Ok(Self::from_values(&values))
    }

    pub fn from_values(values: &HashMap<String, String>) -> Self {
        let non_blank = |key: &str| {
            values
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            api_key: non_blank(API_KEY),
            model: non_blank(MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            tone: non_blank(TONE).unwrap_or_else(|| DEFAULT_TONE.to_string()),
        }
    }

    /// The API key, if one is configured
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(pairs: &[(&str, &str)]) -> Self {
        Self {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, keys: &[&str]) -> Result<HashMap<String, String>> {
        Ok(keys
            .iter()
            .filter_map(|key| self.values.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect())
    }

    fn set(&mut self, pairs: &[(&str, &str)]) -> Result<()> {
        for (key, value) in pairs {
            self.values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// YAML-file store, by default at `~/.config/penmate/settings.yaml`
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the standard config location
    pub fn default_location() -> Option<Self> {
        crate::config_paths::settings_file().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings at {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse settings at {}", self.path.display()))
    }
}

impl SettingsStore for FileStore {
    fn get(&self, keys: &[&str]) -> Result<HashMap<String, String>> {
        let all = self.read_all()?;
        Ok(keys
            .iter()
            .filter_map(|key| all.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect())
    }

    fn set(&mut self, pairs: &[(&str, &str)]) -> Result<()> {
        let mut all = self.read_all()?;
        for (key, value) in pairs {
            all.insert(key.to_string(), value.to_string());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }
        let content = serde_yaml::to_string(&all).context("Failed to serialize settings")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;

        tracing::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let settings = Settings::load(&MemoryStore::new()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.model, "gpt-3.5-turbo");
        assert_eq!(settings.credential(), None);
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let store = MemoryStore::with(&[(API_KEY, "   "), (MODEL, "gpt-4")]);
        let settings = Settings::load(&store).unwrap();
        assert_eq!(settings.credential(), None);
        assert_eq!(settings.model, "gpt-4");
    }

    #[test]
    fn test_memory_store_get_only_requested_keys() {
        let mut store = MemoryStore::new();
        store.set(&[(API_KEY, "sk-test"), (TONE, "casual")]).unwrap();

        let values = store.get(&[API_KEY, MODEL]).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values.get(API_KEY).map(String::as_str), Some("sk-test"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("settings.yaml"));

        assert!(store.get(&[API_KEY]).unwrap().is_empty());
        store.set(&[(API_KEY, "sk-file")]).unwrap();
        store.set(&[(MODEL, "gpt-4o")]).unwrap();

        let settings = Settings::load(&store).unwrap();
        assert_eq!(settings.credential(), Some("sk-file"));
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.tone, DEFAULT_TONE);
    }

    #[test]
    fn test_file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "- just\n- a list\n").unwrap();

        assert!(Settings::load(&FileStore::new(path)).is_err());
    }
}
