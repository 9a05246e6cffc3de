//! Local configuration file, distinct from the per-repository `head.configuration`
//! map: this is process-wide settings (user identity, default branch) read
//! from `~/.config/art/config.toml` or a repository-local override.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub user: UserConfig,
    #[serde(default)]
    pub core: CoreConfig,
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct UserConfig {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CoreConfig {
    #[serde(default = "default_branch")]
    pub default_branch: String,
    #[serde(default)]
    pub verbose: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_branch: default_branch(),
            verbose: false,
        }
    }
}

fn default_branch() -> String {
    "main".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "user.name" => self.user.name.clone(),
            "user.email" => self.user.email.clone(),
            "core.default_branch" => Some(self.core.default_branch.clone()),
            "core.verbose" => Some(self.core.verbose.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "user.name" => self.user.name = Some(value.to_string()),
            "user.email" => self.user.email = Some(value.to_string()),
            "core.default_branch" => self.core.default_branch = value.to_string(),
            "core.verbose" => {
                self.core.verbose = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                    reason: "expected boolean".to_string(),
                })?
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn unset(&mut self, key: &str) -> Result<bool, ConfigError> {
        match key {
            "user.name" => Ok(self.user.name.take().is_some()),
            "user.email" => Ok(self.user.email.take().is_some()),
            _ => Err(ConfigError::CannotUnset(key.to_string())),
        }
    }

    pub fn list(&self) -> Vec<(String, String)> {
        let mut items = Vec::new();
        if let Some(ref name) = self.user.name {
            items.push(("user.name".to_string(), name.clone()));
        }
        if let Some(ref email) = self.user.email {
            items.push(("user.email".to_string(), email.clone()));
        }
        items.push((
            "core.default_branch".to_string(),
            self.core.default_branch.clone(),
        ));
        items.push(("core.verbose".to_string(), self.core.verbose.to_string()));
        items
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("unknown config key: {0}")]
    UnknownKey(String),

    #[error("cannot unset '{0}' (required or unknown key)")]
    CannotUnset(String),

    #[error("invalid value for '{key}': {value} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// The global config path, `~/.config/art/config.toml` (platform-appropriate).
pub fn global_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("art")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_default() {
        let temp = tempdir().unwrap();
        let config = Config::load(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config.core.default_branch, "main");
    }

    #[test]
    fn set_then_save_then_load_roundtrips() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        let mut config = Config::default();
        config.set("user.name", "ada").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.get("user.name"), Some("ada".to_string()));
    }

    #[test]
    fn unknown_key_rejected() {
        let mut config = Config::default();
        assert!(config.set("nonsense.key", "x").is_err());
    }
}
