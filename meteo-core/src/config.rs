use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://api.open-meteo.com/v1";
pub const DEFAULT_GEO_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1";
pub const DEFAULT_CITY: &str = "London";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Unit system used when rendering readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(Units::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(Units::Imperial),
            _ => Err(anyhow!("Unknown units '{value}'. Supported units: metric, imperial.")),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_city = "Lisbon"
/// units = "metric"
/// api_base_url = "https://api.open-meteo.com/v1"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Forecast API base, without a trailing `/forecast`.
    pub api_base_url: String,

    /// Geocoding API base, without a trailing `/search`.
    pub geo_base_url: String,

    /// City used when a command is given none.
    pub default_city: String,

    pub units: Units,

    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            geo_base_url: DEFAULT_GEO_BASE_URL.to_string(),
            default_city: DEFAULT_CITY.to_string(),
            units: Units::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
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
        let dirs = ProjectDirs::from("dev", "meteo", "meteo-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// `city` if given and non-blank, otherwise the configured default.
    pub fn city_or_default<'a>(&'a self, city: Option<&'a str>) -> &'a str {
        city.map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(self.default_city.as_str())
    }
}
