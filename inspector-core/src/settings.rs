use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Behaviour switches of a collection manager, read from a TOML file such
/// as:
///
/// ```toml
/// title = "Cameras"
/// force_unique_names = true
/// add_existing_items = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerSettings {
    pub title: String,
    /// Offer the add button.
    pub allow_add: bool,
    /// Offer the remove button.
    pub allow_remove: bool,
    /// Rename new items to "name - N" when the name is taken.
    pub force_unique_names: bool,
    /// Add an item even if one with the same name exists; otherwise the
    /// existing one is selected.
    pub add_existing_items: bool,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            title: "Items".to_string(),
            allow_add: true,
            allow_remove: true,
            force_unique_names: true,
            add_existing_items: true,
        }
    }
}

impl ManagerSettings {
    pub fn from_toml_str(data: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(data)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let data = fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }
}
