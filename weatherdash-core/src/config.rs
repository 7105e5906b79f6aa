use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{model::Coordinates, provider::openweather::DEFAULT_BASE_URL};

/// Where the locator gets its position from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// When false, location lookups are refused as if permission was denied.
    #[serde(default = "default_share")]
    pub share: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            share: default_share(),
            latitude: None,
            longitude: None,
        }
    }
}

impl LocationConfig {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "London"
///
/// [location]
/// latitude = 51.5
/// longitude = -0.12
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather `appid`.
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// City shown when no location is given.
    #[serde(default = "default_city")]
    pub default_city: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub location: LocationConfig,
}

fn default_share() -> bool {
    true
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_city() -> String {
    "London".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_city: default_city(),
            timeout_secs: default_timeout_secs(),
            location: LocationConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
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

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Path to the saved favorites list.
    pub fn favorites_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().join("saved_cities.json"))
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_home(&mut self, coords: Coordinates) {
        self.location.latitude = Some(coords.lat);
        self.location.longitude = Some(coords.lon);
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weatherdash", "weatherdash")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.default_city, "London");
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert!(cfg.location.share);
        assert!(cfg.location.coordinates().is_none());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());
        assert_eq!(cfg.api_key(), None);

        cfg.set_api_key("OPEN_KEY".into());
        assert_eq!(cfg.api_key(), Some("OPEN_KEY"));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            api_key = "abc"

            [location]
            latitude = 52.5
            "#,
        )
        .expect("config should parse");

        assert_eq!(cfg.api_key(), Some("abc"));
        assert_eq!(cfg.default_city, "London");
        assert!(cfg.location.share);
        assert!(cfg.location.coordinates().is_none());
    }

    #[test]
    fn missing_file_yields_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(cfg.default_city, "London");
    }

    #[test]
    fn save_and_load_preserve_home() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.default_city = "Paris".into();
        cfg.set_home(Coordinates::new(48.85, 2.35));
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.api_key(), Some("KEY"));
        assert_eq!(loaded.default_city, "Paris");
        assert_eq!(
            loaded.location.coordinates(),
            Some(Coordinates::new(48.85, 2.35))
        );
    }

    #[test]
    fn unparsable_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
