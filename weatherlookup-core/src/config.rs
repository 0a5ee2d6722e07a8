use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{
    clock::DisplayZone,
    model::{DEFAULT_CITY, DEFAULT_COUNTRY},
    provider::openweather::DEFAULT_BASE_URL,
};

/// Environment variable that overrides the API key stored in the config file.
pub const API_KEY_ENV: &str = "WEATHERLOOKUP_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// city = "Lucknow"
/// country = "India"
/// utc_offset = "+05:30"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key. Never compiled in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Location shown at startup.
    #[serde(default = "default_city")]
    pub city: String,

    #[serde(default = "default_country")]
    pub country: String,

    /// `local` or a fixed offset like `+05:30`; unset means local.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            city: default_city(),
            country: default_country(),
            utc_offset: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherlookup", "weatherlookup")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key to use: a non-empty `env_key` wins over the stored one.
    pub fn resolve_api_key<'a>(&'a self, env_key: Option<&'a str>) -> Option<&'a str> {
        env_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty()))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        let trimmed = api_key.trim();
        self.api_key = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn display_zone(&self) -> Result<DisplayZone> {
        match self.utc_offset.as_deref() {
            None => Ok(DisplayZone::Local),
            Some(text) => text.parse(),
        }
    }
}
