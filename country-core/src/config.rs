use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::Coordinates;

pub const DEFAULT_GEOCODE_URL: &str = "https://geocode.xyz";
pub const DEFAULT_COUNTRY_URL: &str = "https://restcountries.com/v3.1";

/// Base URLs of the two upstream services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocode_url: String,
    pub country_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            country_url: DEFAULT_COUNTRY_URL.to_string(),
        }
    }
}

/// Fixed position used as the host geolocation capability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LocationConfig> for Coordinates {
    fn from(loc: LocationConfig) -> Self {
        Coordinates::new(loc.latitude, loc.longitude)
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// When false the widget behaves as if location permission was denied.
    pub geolocation: bool,

    pub endpoints: Endpoints,

    /// Example TOML:
    /// [location]
    /// latitude = 48.8566
    /// longitude = 2.3522
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self { geolocation: true, endpoints: Endpoints::default(), location: None }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
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

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "country-lookup", "country-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Store a fixed position and turn geolocation on.
    pub fn set_location(&mut self, coords: Coordinates) {
        self.location = Some(LocationConfig {
            latitude: coords.latitude,
            longitude: coords.longitude,
        });
        self.geolocation = true;
    }

    pub fn clear_location(&mut self) {
        self.location = None;
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location.map(Coordinates::from)
    }
}
