use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::city::DEFAULT_CITY;

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "WEATHERBIT_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// city = "Tokyo"
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Last selected city.
    pub city: Option<String>,

    /// Weatherbit API key.
    pub api_key: Option<String>,

    /// Override for the API base URL, e.g. a local mock.
    pub base_url: Option<String>,
}

impl Config {
    /// The persisted city, or [`DEFAULT_CITY`] when none (or a blank one) is stored.
    pub fn selected_city(&self) -> &str {
        self.city.as_deref().filter(|c| !c.trim().is_empty()).unwrap_or(DEFAULT_CITY)
    }

    /// Remember `city` as the selection. Call [`Config::save`] to persist it.
    pub fn select_city(&mut self, city: impl Into<String>) {
        self.city = Some(city.into());
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// API key from the environment, falling back to the config file.
    pub fn api_key(&self) -> Option<String> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        resolve_api_key(from_env, self.api_key.as_deref())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherdash", "weatherdash")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn resolve_api_key(from_env: Option<String>, stored: Option<&str>) -> Option<String> {
    from_env
        .filter(|k| !k.trim().is_empty())
        .or_else(|| stored.filter(|k| !k.trim().is_empty()).map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_city_defaults_when_unset() {
        let cfg = Config::default();
        assert_eq!(cfg.selected_city(), DEFAULT_CITY);
    }

    #[test]
    fn selected_city_survives_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::load_from(&path).expect("missing file loads as default");
        assert_eq!(cfg, Config::default());

        cfg.select_city("Gaborone");
        cfg.save_to(&path).expect("save");

        let reloaded = Config::load_from(&path).expect("reload");
        assert_eq!(reloaded.selected_city(), "Gaborone");
    }

    #[test]
    fn blank_stored_city_falls_back_to_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.select_city("  ");
        cfg.save_to(&path).expect("save");

        let reloaded = Config::load_from(&path).expect("reload");
        assert_eq!(reloaded.selected_city(), DEFAULT_CITY);
    }

    #[test]
    fn select_city_replaces_previous_selection() {
        let mut cfg = Config::default();
        cfg.select_city("London");
        cfg.select_city("Paris");

        assert_eq!(cfg.selected_city(), "Paris");
    }

    #[test]
    fn malformed_file_is_reported_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "city = [not toml").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn env_key_wins_over_stored_key() {
        let key = resolve_api_key(Some("ENV".into()), Some("FILE"));
        assert_eq!(key.as_deref(), Some("ENV"));
    }

    #[test]
    fn blank_keys_are_ignored() {
        assert_eq!(resolve_api_key(Some("  ".into()), Some("FILE")).as_deref(), Some("FILE"));
        assert_eq!(resolve_api_key(None, Some("")), None);
    }
}
