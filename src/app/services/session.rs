use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app::domain::config::PageConfig;
use crate::app::infrastructure::error::Result;

pub const FRAMEWORK_KEY: &str = "pagepad.framework";
pub const ORIENTATION_KEY: &str = "pagepad.orientation";
pub const USER_CONTENT_KEY: &str = "pagepad.userContent";

/// Last-known configuration and user content, as plain text entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedState {
    entries: BTreeMap<String, String>,
}

/// Returns the state file path: data_dir/pagepad/state.json
pub fn state_path() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("pagepad");
    path.push("state.json");
    path
}

impl PersistedState {
    pub fn capture(config: PageConfig, user_content: &str) -> Self {
        let mut state = Self::default();
        state.set(FRAMEWORK_KEY, config.framework.name());
        state.set(ORIENTATION_KEY, config.orientation.name());
        state.set(USER_CONTENT_KEY, user_content);
        state
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored configuration. Missing entries take the defaults; unknown
    /// names fail with `InvalidConfiguration`.
    pub fn config(&self) -> Result<PageConfig> {
        let defaults = PageConfig::default();
        let framework = self.get(FRAMEWORK_KEY).unwrap_or(defaults.framework.name());
        let orientation = self.get(ORIENTATION_KEY).unwrap_or(defaults.orientation.name());
        PageConfig::parse(framework, orientation)
    }

    /// Configuration to start the session with. Bad entries are logged and
    /// replaced by the default.
    pub fn config_or_default(&self) -> PageConfig {
        self.config().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored page configuration rejected, using default");
            PageConfig::default()
        })
    }

    pub fn user_content(&self) -> Option<&str> {
        self.get(USER_CONTENT_KEY)
    }

    pub fn load() -> Self {
        Self::load_from(&state_path())
    }

    /// Missing or unreadable state yields an empty map.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = %path.display(), "failed to parse persisted state");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&state_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
