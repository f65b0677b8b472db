use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    pagination::{DEFAULT_PAGE_SIZE, Pagination},
    provider::openweather::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT},
    units::TemperatureUnit,
};

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
/// Environment variable pointing at an alternate config file.
pub const CONFIG_PATH_ENV: &str = "WEATHER_DASHBOARD_CONFIG";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// unit = "fahrenheit"
/// page_size = 3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Override for the OpenWeather API root, mostly for testing.
    pub base_url: Option<String>,

    pub page_size: Option<usize>,

    pub unit: Option<TemperatureUnit>,

    /// Request timeout in seconds; `0` disables the timeout.
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page_size())
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit.unwrap_or_default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            None => Some(DEFAULT_TIMEOUT),
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }

    /// Load config from disk (or defaults) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// Read `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Overlay values found through `lookup`; only the API key is read.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
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

        Ok(())
    }

    /// Path to the config file, honouring `WEATHER_DASHBOARD_CONFIG`.
    pub fn config_file_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::default();
        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.page_size(), 3);
        assert_eq!(cfg.unit(), TemperatureUnit::Celsius);
        assert_eq!(cfg.timeout(), Some(DEFAULT_TIMEOUT));
    }

    #[test]
    fn zero_timeout_disables_it() {
        let cfg = Config {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.timeout(), None);
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key(String::new());
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn env_key_overrides_file_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        cfg.apply_env(|k| (k == API_KEY_ENV).then(|| " ENV_KEY ".to_string()));
        assert_eq!(cfg.api_key(), Some("ENV_KEY"));

        cfg.apply_env(|_| Some("   ".to_string()));
        assert_eq!(cfg.api_key(), Some("ENV_KEY"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: Some("KEY".into()),
            page_size: Some(5),
            unit: Some(TemperatureUnit::Fahrenheit),
            ..Default::default()
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.pagination().page_size(), 5);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = \"many\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
