//! Settings persistence — YAML load/save for the music preference.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether background music plays. ON by default; a user who turns it
    /// off stays opted out across sessions.
    pub music: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { music: true }
    }
}

/// Default path for the settings file.
pub fn default_settings_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".nocturne");
    path.push("settings.yaml");
    path
}

/// Load settings from a YAML file. Returns defaults if the file doesn't exist.
pub fn load(path: &Path) -> Result<Settings, io::Error> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Save settings to a YAML file, creating parent directories as needed.
pub fn save(path: &Path, settings: &Settings) -> Result<(), io::Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(settings).map_err(io::Error::other)?;
    std::fs::write(path, yaml)
}
